//! Two-button watcher library.
//!
//! Exposes the watch loop, the event record and the GPIO channel for
//! integration testing and reuse. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;

pub use app::events::{ButtonEvent, LogicalPin};
pub use app::ports::HardwareChannel;
pub use app::watcher::ButtonWatcher;
pub use error::{ChannelError, WatchError};
