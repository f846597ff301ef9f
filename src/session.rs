//! Session-level continuity across configuration files.
//!
//! A project may load several config files against one hardware snapshot.
//! [`BindingSession`] keeps the outcomes of earlier files so a reference that
//! was already rebound stays on the same physical device, collects the
//! outcomes a UI still has to resolve, and folds the user's choices back in.

use thiserror::Error;
use tracing::debug;

use crate::binder::{AutoBinder, ConfigSlot};
use crate::binding::{BindingStatus, ControllerBinding};
use crate::controller::Controller;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("no binding outcome for reference {0}")]
    UnknownReference(Controller),

    #[error("reference {0} is already resolved")]
    AlreadyResolved(Controller),

    #[error("controller {0} is not connected")]
    NotConnected(Controller),

    #[error("controller {0} is already bound to another reference")]
    AlreadyBound(Controller),
}

/// Accumulates binding outcomes over the config files of one session.
///
/// The snapshot is fixed at construction; start a new session if hardware is
/// plugged or unplugged.
pub struct BindingSession {
    binder: AutoBinder,
    bindings: Vec<ControllerBinding>,
}

impl BindingSession {
    /// Starts a session against a snapshot of the connected controllers.
    pub fn new(connected: Vec<Controller>) -> Self {
        Self {
            binder: AutoBinder::new(connected),
            bindings: Vec::new(),
        }
    }

    pub fn binder(&self) -> &AutoBinder {
        &self.binder
    }

    /// All outcomes accumulated so far, one per reference seen this session.
    pub fn bindings(&self) -> &[ControllerBinding] {
        &self.bindings
    }

    /// Outcomes still waiting for the user to pick a device.
    pub fn pending_manual(&self) -> Vec<&ControllerBinding> {
        self.bindings
            .iter()
            .filter(|b| b.status == BindingStatus::RequiresManualBind && b.bound.is_none())
            .collect()
    }

    /// Analyzes one config file's items, seeded with the outcomes of earlier
    /// files so already-bound devices are not re-assigned. Returns the
    /// outcomes of this pass; the accumulated set is updated in place.
    pub fn analyze<S: ConfigSlot>(&mut self, items: &[S]) -> Vec<ControllerBinding> {
        let pass = self.binder.analyze(items, &self.bindings);
        for binding in &pass {
            match self
                .bindings
                .iter_mut()
                .find(|b| b.original == binding.original)
            {
                Some(existing) => *existing = binding.clone(),
                None => self.bindings.push(binding.clone()),
            }
        }
        debug!(
            pass = pass.len(),
            total = self.bindings.len(),
            "merged pass outcomes into session"
        );
        pass
    }

    /// Records the user's choice for a reference that could not be resolved
    /// automatically. The outcome keeps its status tag but now carries a
    /// bound device, so [`Self::apply_resolved`] will write it back.
    pub fn complete_manual(
        &mut self,
        original: &Controller,
        chosen: Controller,
    ) -> Result<(), SessionError> {
        if !self.binder.connected().contains(&chosen) {
            return Err(SessionError::NotConnected(chosen));
        }
        if self
            .bindings
            .iter()
            .any(|b| b.bound.as_ref() == Some(&chosen))
        {
            return Err(SessionError::AlreadyBound(chosen));
        }
        let binding = self
            .bindings
            .iter_mut()
            .find(|b| b.original == *original)
            .ok_or_else(|| SessionError::UnknownReference(original.clone()))?;
        if binding.bound.is_some() {
            return Err(SessionError::AlreadyResolved(original.clone()));
        }
        binding.bound = Some(chosen);
        Ok(())
    }

    /// Applies the session's `AutoBind` outcomes to the given items.
    pub fn apply_auto<S: ConfigSlot>(&self, items: &mut [S]) -> Vec<ControllerBinding> {
        AutoBinder::apply_auto_bindings(items, &self.bindings)
    }

    /// Applies every outcome carrying a bound device, including completed
    /// manual ones.
    pub fn apply_resolved<S: ConfigSlot>(&self, items: &mut [S]) {
        AutoBinder::apply_resolved_bindings(items, &self.bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{controller, slots};

    #[test]
    fn second_file_keeps_the_device_chosen_for_the_first() {
        let mut session = BindingSession::new(vec![
            controller("Board1/ SN-2"),
            controller("PanelX/ SN-9"),
        ]);

        let first = session.analyze(&slots(&["Board1/ SN-1"]));
        assert_eq!(first[0].status, BindingStatus::AutoBind);
        let bound = first[0].bound.clone();

        let second = session.analyze(&slots(&["Board1/ SN-1", "PanelX/ SN-9"]));
        assert_eq!(second.len(), 2);
        let reused = second
            .iter()
            .find(|b| b.original == controller("Board1/ SN-1"))
            .unwrap();
        assert_eq!(reused.status, BindingStatus::AutoBind);
        assert_eq!(reused.bound, bound);

        assert_eq!(session.bindings().len(), 2);
    }

    #[test]
    fn pending_manual_lists_unresolved_ambiguous_outcomes() {
        let mut session = BindingSession::new(vec![
            controller("Joystick X/ JS-1"),
            controller("Joystick X/ JS-2"),
        ]);

        session.analyze(&slots(&["Joystick X/ JS-9"]));

        let pending = session.pending_manual();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].original, controller("Joystick X/ JS-9"));
    }

    #[test]
    fn completing_a_manual_bind_clears_it_from_pending() {
        let mut session = BindingSession::new(vec![
            controller("Joystick X/ JS-1"),
            controller("Joystick X/ JS-2"),
        ]);
        session.analyze(&slots(&["Joystick X/ JS-9"]));

        session
            .complete_manual(&controller("Joystick X/ JS-9"), controller("Joystick X/ JS-1"))
            .unwrap();

        assert!(session.pending_manual().is_empty());
        assert_eq!(
            session.bindings()[0].bound.as_ref().unwrap(),
            &controller("Joystick X/ JS-1")
        );
        assert_eq!(
            session.bindings()[0].status,
            BindingStatus::RequiresManualBind
        );
    }

    #[test]
    fn manual_choice_must_be_a_connected_controller() {
        let mut session = BindingSession::new(vec![controller("Joystick X/ JS-1")]);
        session.analyze(&slots(&["Board1/ SN-1"]));

        let err = session
            .complete_manual(&controller("Board1/ SN-1"), controller("Board1/ SN-2"))
            .unwrap_err();
        assert_eq!(err, SessionError::NotConnected(controller("Board1/ SN-2")));
    }

    #[test]
    fn manual_choice_cannot_take_an_already_bound_device() {
        let mut session = BindingSession::new(vec![
            controller("Joystick X/ JS-1"),
            controller("Joystick X/ JS-2"),
            controller("Board1/ SN-1"),
        ]);
        session.analyze(&slots(&["Board1/ SN-1", "Joystick X/ JS-8", "Joystick X/ JS-9"]));

        let err = session
            .complete_manual(&controller("Joystick X/ JS-8"), controller("Board1/ SN-1"))
            .unwrap_err();
        assert_eq!(err, SessionError::AlreadyBound(controller("Board1/ SN-1")));
    }

    #[test]
    fn unknown_and_already_resolved_references_are_rejected() {
        let mut session = BindingSession::new(vec![controller("Board1/ SN-1")]);
        session.analyze(&slots(&["Board1/ SN-1"]));

        let err = session
            .complete_manual(&controller("Board9/ SN-9"), controller("Board1/ SN-1"))
            .unwrap_err();
        assert_eq!(
            err,
            SessionError::AlreadyBound(controller("Board1/ SN-1"))
        );

        let mut session = BindingSession::new(vec![
            controller("Board1/ SN-1"),
            controller("Board2/ SN-2"),
        ]);
        session.analyze(&slots(&["Board1/ SN-1"]));

        let err = session
            .complete_manual(&controller("Board9/ SN-9"), controller("Board2/ SN-2"))
            .unwrap_err();
        assert_eq!(err, SessionError::UnknownReference(controller("Board9/ SN-9")));

        let err = session
            .complete_manual(&controller("Board1/ SN-1"), controller("Board2/ SN-2"))
            .unwrap_err();
        assert_eq!(err, SessionError::AlreadyResolved(controller("Board1/ SN-1")));
    }
}
