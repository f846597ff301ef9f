//! The binding reconciliation engine.
//!
//! One [`AutoBinder`] wraps a fixed snapshot of the currently connected
//! controllers. A reconciliation pass ([`AutoBinder::analyze`]) resolves
//! every unique reference found in a set of configuration items against a
//! pass-local pool copied from that snapshot, so a physical device is never
//! handed to two references. The binder has no hot-plug awareness: if
//! devices connect or disconnect, build a new one from a fresh snapshot.

use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::binding::{BindingStatus, ControllerBinding};
use crate::controller::Controller;
use crate::serial::{self, device_identifier};

/// A configuration item that stores which controller it should drive.
///
/// Everything else about the item is irrelevant to reconciliation; config
/// file types implement this on whatever record they use.
pub trait ConfigSlot {
    fn controller(&self) -> Option<&Controller>;
    fn set_controller(&mut self, controller: Controller);
}

/// Matches stored controller references against connected hardware.
pub struct AutoBinder {
    connected: Vec<Controller>,
    type_counts: HashMap<String, usize>,
}

impl AutoBinder {
    /// Wraps a snapshot of the currently connected controllers.
    pub fn new(connected: Vec<Controller>) -> Self {
        let mut type_counts: HashMap<String, usize> = HashMap::new();
        for controller in &connected {
            *type_counts.entry(device_identifier(controller)).or_insert(0) += 1;
        }
        Self {
            connected,
            type_counts,
        }
    }

    /// The snapshot this binder resolves against.
    pub fn connected(&self) -> &[Controller] {
        &self.connected
    }

    /// Device identifiers with more than one connected unit, e.g. two
    /// identical panels plugged in at once. Diagnostic metadata for UI
    /// warnings; the matching rules detect ambiguity independently.
    pub fn duplicate_device_types(&self) -> Vec<String> {
        let mut duplicates: Vec<String> = self
            .type_counts
            .iter()
            .filter(|(_, count)| **count > 1)
            .map(|(identifier, _)| identifier.clone())
            .collect();
        duplicates.sort();
        duplicates
    }

    /// Runs one reconciliation pass over the given configuration items.
    ///
    /// `existing` carries outcomes from earlier passes in the same session;
    /// a reference resolved there keeps its device if it is still connected.
    /// Returns one outcome per unique valid reference, except that a
    /// reference whose previously bound device has since disappeared is
    /// omitted from the output (logged as a warning).
    pub fn analyze<S: ConfigSlot>(
        &self,
        items: &[S],
        existing: &[ControllerBinding],
    ) -> Vec<ControllerBinding> {
        let mut available = self.connected.clone();

        let mut unique: Vec<Controller> = Vec::new();
        for item in items {
            if let Some(reference) = valid_reference(item) {
                if !unique.contains(reference) {
                    unique.push(reference.clone());
                }
            }
        }

        // References that resolve for free go first so a heuristic match
        // cannot steal the device they need. The sort is stable, keeping
        // config order within each group.
        unique.sort_by_key(|reference| {
            let free = self.connected.contains(reference)
                || existing.iter().any(|b| b.original == *reference);
            !free
        });

        debug!(
            references = unique.len(),
            connected = self.connected.len(),
            existing = existing.len(),
            "analyzing controller bindings"
        );

        let mut results = Vec::with_capacity(unique.len());
        for reference in &unique {
            if let Some(previous) = existing.iter().find(|b| b.original == *reference) {
                let still_available = previous
                    .bound
                    .as_ref()
                    .and_then(|bound| available.iter().position(|c| c == bound));
                match still_available {
                    Some(index) => {
                        let bound = available.remove(index);
                        let binding = if bound == *reference {
                            ControllerBinding::matched(reference.clone(), bound)
                        } else {
                            ControllerBinding::auto_bound(reference.clone(), bound)
                        };
                        trace!(
                            reference = %reference,
                            status = %binding.status,
                            "reused binding from earlier pass"
                        );
                        results.push(binding);
                    }
                    None => {
                        // Known gap: the reference disappears from this
                        // pass's output instead of reporting Missing.
                        warn!(
                            reference = %reference,
                            "previously bound controller no longer available; reference omitted from this pass"
                        );
                    }
                }
                continue;
            }

            let binding = self.resolve_single(reference, &unique, &available);
            if let Some(bound) = &binding.bound {
                if let Some(index) = available.iter().position(|c| c == bound) {
                    available.remove(index);
                }
            }
            trace!(reference = %reference, status = %binding.status, "resolved reference");
            results.push(binding);
        }

        results
    }

    /// Decision table for a single reference; the first matching rule wins.
    fn resolve_single(
        &self,
        reference: &Controller,
        unique: &[Controller],
        available: &[Controller],
    ) -> ControllerBinding {
        // Exact name and serial match.
        if available.contains(reference) {
            return ControllerBinding::matched(reference.clone(), reference.clone());
        }

        let identifier = device_identifier(reference);
        let type_matches: Vec<&Controller> = available
            .iter()
            .filter(|c| device_identifier(c) == identifier)
            .collect();
        let serial_matches: Vec<&Controller> = available
            .iter()
            .filter(|c| c.serial == reference.serial)
            .collect();

        // Nothing plausible is connected.
        if type_matches.is_empty() && serial_matches.is_empty() {
            return ControllerBinding::missing(reference.clone());
        }

        // Several connected units of the same model; cannot guess which one
        // the user meant.
        if type_matches.len() > 1 {
            return ControllerBinding::requires_manual(reference.clone());
        }

        // Several references in this pass compete for the same device model;
        // guessing here could cross-wire them.
        let competing = unique
            .iter()
            .filter(|r| device_identifier(r) == identifier)
            .count();
        if competing > 1 {
            return ControllerBinding::requires_manual(reference.clone());
        }

        // Single candidate: a model match (serial re-enumerated) is preferred
        // over a bare serial match (device renamed).
        let candidate = if type_matches.len() == 1 {
            type_matches.first()
        } else if serial_matches.len() == 1 {
            serial_matches.first()
        } else {
            None
        };
        if let Some(candidate) = candidate {
            return ControllerBinding::auto_bound(reference.clone(), (*candidate).clone());
        }

        // Fallback, e.g. the same serial reported by several devices.
        ControllerBinding::missing(reference.clone())
    }

    /// Writes `AutoBind` outcomes back into the configuration items and
    /// returns that subset. Items resolved as `Match`, `Missing` or
    /// `RequiresManualBind` are left untouched.
    pub fn apply_auto_bindings<S: ConfigSlot>(
        items: &mut [S],
        bindings: &[ControllerBinding],
    ) -> Vec<ControllerBinding> {
        let auto: Vec<ControllerBinding> = bindings
            .iter()
            .filter(|b| b.status == BindingStatus::AutoBind)
            .cloned()
            .collect();
        if auto.is_empty() {
            return auto;
        }

        for item in items.iter_mut() {
            let bound = match item.controller() {
                Some(current) => auto
                    .iter()
                    .find(|b| b.original == *current)
                    .and_then(|b| b.bound.clone()),
                None => None,
            };
            if let Some(bound) = bound {
                item.set_controller(bound);
            }
        }
        auto
    }

    /// Broader write-back used once manual choices are in: every outcome
    /// carrying a bound controller is applied, including manually completed
    /// `RequiresManualBind` entries. Items with an absent or never-assigned
    /// reference are skipped.
    pub fn apply_resolved_bindings<S: ConfigSlot>(
        items: &mut [S],
        bindings: &[ControllerBinding],
    ) {
        for item in items.iter_mut() {
            let bound = match valid_reference(item) {
                Some(current) => bindings
                    .iter()
                    .find(|b| b.original == *current)
                    .and_then(|b| b.bound.clone()),
                None => None,
            };
            if let Some(bound) = bound {
                item.set_controller(bound);
            }
        }
    }
}

/// A usable stored reference: present and not the "not set" placeholder.
fn valid_reference<S: ConfigSlot>(item: &S) -> Option<&Controller> {
    item.controller().filter(|c| serial::is_set(&c.serial))
}
