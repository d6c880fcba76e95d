//! Button event record.
//!
//! A [`ButtonEvent`] describes one observed press or release on one of the
//! two logical pins.  Records are produced by a
//! [`HardwareChannel`](super::ports::HardwareChannel) and handed, by value,
//! to the handler passed to [`ButtonWatcher::run`](super::watcher::ButtonWatcher::run).

use core::fmt;

use serde::Serialize;

use crate::pins;

/// Logical button, bound to a fixed GPIO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum LogicalPin {
    A,
    B,
}

impl LogicalPin {
    /// Hardware line this logical pin is wired to.
    pub const fn gpio(self) -> i32 {
        match self {
            Self::A => pins::BUTTON_A_GPIO,
            Self::B => pins::BUTTON_B_GPIO,
        }
    }
}

impl fmt::Display for LogicalPin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// One press/release transition.
///
/// Timestamps are milliseconds on the monotonic boot clock.  For a given
/// pin `when >= last_change` always holds, and successive events carry
/// non-decreasing `when`.
///
/// Serialise-only: events are built through [`ButtonEvent::new`] or by the
/// edge tracker, never read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonEvent {
    /// Button that changed.
    pub pin: LogicalPin,
    /// `true` when the button went down, `false` when it came back up.
    pub pressed: bool,
    /// When the transition was observed.
    pub when: u64,
    /// When the previous transition on the same pin was observed.
    pub last_change: u64,
}

impl ButtonEvent {
    pub fn new(pin: LogicalPin, pressed: bool, when: u64, last_change: u64) -> Self {
        debug_assert!(when >= last_change, "event timestamp precedes previous change");
        Self {
            pin,
            pressed,
            when,
            last_change,
        }
    }

    pub fn released(&self) -> bool {
        !self.pressed
    }

    /// Time spent in the previous state.  For a release this is how long
    /// the button was held down.
    pub fn since_last_change(&self) -> u64 {
        self.when.saturating_sub(self.last_change)
    }
}

impl fmt::Display for ButtonEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pin={} pressed={} when={} last_change={}",
            self.pin, self.pressed, self.when, self.last_change
        )
    }
}
