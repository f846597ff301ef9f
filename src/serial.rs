//! Serial string conventions.
//!
//! Connected controllers report a serial of the form `<family>-<instance>`,
//! e.g. `SN-1234567890` for boards or `JS-b0875190-...` for joysticks. UI
//! boundaries additionally use a full serial string of the form
//! `<name>/ <serial>` combining both identity fields into one line.

use crate::controller::Controller;

/// Placeholder serial for config items that have never been assigned
/// hardware. References carrying it are excluded from reconciliation.
pub const NOT_SET: &str = "-";

/// Separator between name and serial in a full serial string.
pub const FULL_SERIAL_SEPARATOR: &str = "/ ";

/// Separator between the family prefix and the instance id inside a serial.
pub const PREFIX_SEPARATOR: char = '-';

/// Extracts the family prefix from a serial, e.g. `SN` from `SN-1234`.
/// Empty when the serial carries no prefix separator.
pub fn extract_prefix(serial: &str) -> &str {
    match serial.split_once(PREFIX_SEPARATOR) {
        Some((prefix, _)) => prefix.trim(),
        None => "",
    }
}

/// Grouping key recognizing "same hardware model" irrespective of the
/// instance id: serial family prefix plus device name.
///
/// Used only for candidate grouping, never for final equality.
pub fn device_identifier(controller: &Controller) -> String {
    format!(
        "{}:{}",
        extract_prefix(&controller.serial),
        controller.name.trim()
    )
}

/// Splits a full serial string `<name>/ <serial>` into a [`Controller`].
///
/// Device names may themselves contain slashes, so the split happens at the
/// last separator. A string without a separator is treated as a bare serial
/// with no name.
pub fn split_full(full: &str) -> Controller {
    match full.rsplit_once(FULL_SERIAL_SEPARATOR) {
        Some((name, serial)) => Controller::new(name.trim(), serial.trim()),
        None => Controller::new("", full.trim()),
    }
}

/// Builds the UI-facing full serial string for a controller.
pub fn build_full(controller: &Controller) -> String {
    format!(
        "{}{}{}",
        controller.name, FULL_SERIAL_SEPARATOR, controller.serial
    )
}

/// Whether a stored serial refers to actual hardware rather than the
/// [`NOT_SET`] placeholder.
pub fn is_set(serial: &str) -> bool {
    serial != NOT_SET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_is_everything_before_the_first_dash() {
        assert_eq!(extract_prefix("SN-1234567890"), "SN");
        assert_eq!(extract_prefix("JS-b0875190-3b89-11ed"), "JS");
        assert_eq!(extract_prefix("000393600000"), "");
        assert_eq!(extract_prefix(""), "");
    }

    #[test]
    fn identifier_groups_instances_of_the_same_model() {
        let a = Controller::new("Board1", "SN-1");
        let b = Controller::new("Board1", "SN-2");
        let c = Controller::new("Board2", "SN-1");
        assert_eq!(device_identifier(&a), "SN:Board1");
        assert_eq!(device_identifier(&a), device_identifier(&b));
        assert_ne!(device_identifier(&a), device_identifier(&c));
    }

    #[test]
    fn split_full_handles_plain_names() {
        let c = split_full("GMA345/ SN-b44-4c5");
        assert_eq!(c.name, "GMA345");
        assert_eq!(c.serial, "SN-b44-4c5");

        let c = split_full("Bravo Throttle Quadrant / JS-b0875190-3b89-11ed");
        assert_eq!(c.name, "Bravo Throttle Quadrant");
        assert_eq!(c.serial, "JS-b0875190-3b89-11ed");
    }

    #[test]
    fn split_full_keeps_slashes_inside_the_name() {
        let c = split_full("MFG Crosswind V2/3 / JS-b0875190");
        assert_eq!(c.name, "MFG Crosswind V2/3");
        assert_eq!(c.serial, "JS-b0875190");
    }

    #[test]
    fn split_full_without_separator_is_a_bare_serial() {
        let c = split_full("000393600000");
        assert_eq!(c.name, "");
        assert_eq!(c.serial, "000393600000");
    }

    #[test]
    fn build_full_round_trips_through_split() {
        let c = Controller::new("GMA345", "SN-b44-4c5");
        assert_eq!(build_full(&c), "GMA345/ SN-b44-4c5");
        assert_eq!(split_full(&build_full(&c)), c);
    }

    #[test]
    fn not_set_sentinel_is_not_a_serial() {
        assert!(!is_set(NOT_SET));
        assert!(is_set("SN-1"));
        assert!(is_set(""));
    }
}
