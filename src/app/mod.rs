//! Application core: the watch loop, zero direct I/O.
//!
//! [`watcher::ButtonWatcher`] drives any [`ports::HardwareChannel`] and
//! dispatches [`events::ButtonEvent`]s to a caller-supplied handler, so
//! the loop is fully testable without real buttons.

pub mod events;
pub mod ports;
pub mod watcher;
