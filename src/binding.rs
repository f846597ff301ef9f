//! Binding outcomes and their status taxonomy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::controller::Controller;

/// Resolution status for one logical controller reference.
///
/// The four variant names are stable identifiers and serialize verbatim, so
/// UI processes on the other side of an IPC boundary can switch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingStatus {
    /// A connected controller matches the reference exactly.
    Match,
    /// A single unambiguous candidate was inferred and bound automatically.
    AutoBind,
    /// No candidate among the connected controllers.
    Missing,
    /// Several plausible candidates; the user has to pick one.
    RequiresManualBind,
}

impl BindingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingStatus::Match => "Match",
            BindingStatus::AutoBind => "AutoBind",
            BindingStatus::Missing => "Missing",
            BindingStatus::RequiresManualBind => "RequiresManualBind",
        }
    }
}

impl fmt::Display for BindingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one logical reference during a reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerBinding {
    /// The reference as stored in the configuration.
    pub original: Controller,
    pub status: BindingStatus,
    /// The connected controller the reference resolved to. `None` for
    /// `Missing`, and for `RequiresManualBind` until the user picks a device.
    pub bound: Option<Controller>,
}

impl ControllerBinding {
    pub fn matched(original: Controller, bound: Controller) -> Self {
        Self {
            original,
            status: BindingStatus::Match,
            bound: Some(bound),
        }
    }

    pub fn auto_bound(original: Controller, bound: Controller) -> Self {
        Self {
            original,
            status: BindingStatus::AutoBind,
            bound: Some(bound),
        }
    }

    pub fn missing(original: Controller) -> Self {
        Self {
            original,
            status: BindingStatus::Missing,
            bound: None,
        }
    }

    pub fn requires_manual(original: Controller) -> Self {
        Self {
            original,
            status: BindingStatus::RequiresManualBind,
            bound: None,
        }
    }

    /// Whether this outcome carries a device that can be written back into
    /// configuration items.
    pub fn is_resolved(&self) -> bool {
        self.bound.is_some()
    }
}
