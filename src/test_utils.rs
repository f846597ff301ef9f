//! Shared fixtures for the unit tests.

use crate::binder::ConfigSlot;
use crate::controller::Controller;
use crate::serial;

/// Minimal configuration item carrying only the controller reference.
#[derive(Debug, Clone, Default)]
pub struct TestSlot {
    pub controller: Option<Controller>,
}

impl ConfigSlot for TestSlot {
    fn controller(&self) -> Option<&Controller> {
        self.controller.as_ref()
    }

    fn set_controller(&mut self, controller: Controller) {
        self.controller = Some(controller);
    }
}

/// Builds a controller from a full serial string like `Board1/ SN-1`.
pub fn controller(full: &str) -> Controller {
    serial::split_full(full)
}

/// Builds a config item referencing the given full serial.
pub fn slot(full: &str) -> TestSlot {
    TestSlot {
        controller: Some(controller(full)),
    }
}

pub fn slots(fulls: &[&str]) -> Vec<TestSlot> {
    fulls.iter().map(|full| slot(full)).collect()
}
