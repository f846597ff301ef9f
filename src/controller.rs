//! The controller value type shared by snapshots and stored references.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A controller identified by its display name and serial number.
///
/// The same type describes both a physically connected device and the
/// reference a configuration item stores. Equality is exact and
/// case-sensitive on both fields; heuristic "same model" similarity lives in
/// [`crate::serial::device_identifier`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Controller {
    pub name: String,
    pub serial: String,
}

impl Controller {
    pub fn new(name: impl Into<String>, serial: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            serial: serial.into(),
        }
    }
}

impl fmt::Display for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.serial)
    }
}
