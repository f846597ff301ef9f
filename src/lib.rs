//! Controller binding reconciliation.
//!
//! A configuration stores, per item, the controller it expects to drive as a
//! (name, serial) pair captured when the user first wired things up. At a
//! later session the same hardware may report a different serial after
//! re-enumeration, a different name after a firmware update, or may be gone
//! entirely. This crate reconciles stored references against a snapshot of
//! the currently connected controllers:
//!
//! - exact matches are confirmed,
//! - single unambiguous candidates are rebound automatically,
//! - ambiguous cases are handed to the user,
//! - absent hardware is reported as missing,
//!
//! and no physical device is ever handed to two references in one pass.
//!
//! # Example
//!
//! ```
//! use rebind::{AutoBinder, BindingStatus, ConfigSlot, Controller};
//!
//! struct Item {
//!     controller: Option<Controller>,
//! }
//!
//! impl ConfigSlot for Item {
//!     fn controller(&self) -> Option<&Controller> {
//!         self.controller.as_ref()
//!     }
//!     fn set_controller(&mut self, controller: Controller) {
//!         self.controller = Some(controller);
//!     }
//! }
//!
//! // The board re-enumerated with a fresh serial since the config was saved.
//! let connected = vec![Controller::new("Board1", "SN-2")];
//! let mut items = vec![Item {
//!     controller: Some(Controller::new("Board1", "SN-1")),
//! }];
//!
//! let binder = AutoBinder::new(connected);
//! let outcomes = binder.analyze(&items, &[]);
//! assert_eq!(outcomes[0].status, BindingStatus::AutoBind);
//!
//! let applied = AutoBinder::apply_auto_bindings(&mut items, &outcomes);
//! assert_eq!(applied.len(), 1);
//! assert_eq!(items[0].controller().unwrap().serial, "SN-2");
//! ```

pub mod binder;
pub mod binding;
pub mod controller;
pub mod serial;
pub mod session;

#[cfg(test)]
pub mod test_utils;

pub use binder::{AutoBinder, ConfigSlot};
pub use binding::{BindingStatus, ControllerBinding};
pub use controller::Controller;
pub use session::{BindingSession, SessionError};
