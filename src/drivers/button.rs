//! Polled button driver with press/release edge detection.
//!
//! ## Hardware
//!
//! Momentary switches on input-only GPIOs.  The board wires them
//! active-low with external pull-ups, so a pressed button reads LOW.
//! The sampler thread calls [`ButtonDriver::poll`] at a fixed interval;
//! every level change becomes one [`ButtonEvent`].
//!
//! ## Timestamps
//!
//! | Field         | Meaning                                         |
//! |---------------|-------------------------------------------------|
//! | `when`        | sample time at which the new level was seen     |
//! | `last_change` | `when` of the previous edge (or the prime time) |
//!
//! Priming again on restart keeps `last_change` when the level is the same
//! as when sampling stopped, so a hold spanning a stop/start still reports
//! its full duration on release.
//!
//! No debouncing is done here; contact bounce shows up as extra edges.

use embedded_hal::digital::{Error as _, InputPin};

use crate::app::events::{ButtonEvent, LogicalPin};
use crate::error::ChannelError;

/// Per-pin edge state, independent of how the level is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeTracker {
    pin: LogicalPin,
    pressed: bool,
    last_change_ms: u64,
    primed: bool,
}

impl EdgeTracker {
    pub fn new(pin: LogicalPin) -> Self {
        Self {
            pin,
            pressed: false,
            last_change_ms: 0,
            primed: false,
        }
    }

    pub fn pin(&self) -> LogicalPin {
        self.pin
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Adopt `pressed` as the current level without emitting an event.
    ///
    /// The first prime, or a level that changed while nobody was sampling,
    /// re-bases `last_change` at `now_ms`.  An unchanged level leaves the
    /// tracker untouched.
    pub fn prime(&mut self, pressed: bool, now_ms: u64) {
        if self.primed && pressed == self.pressed {
            return;
        }
        self.primed = true;
        self.pressed = pressed;
        self.last_change_ms = now_ms.max(self.last_change_ms);
    }

    /// Feed one sample.  Returns an event only when the level changed.
    ///
    /// A clock that steps backwards is clamped so `when >= last_change`.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<ButtonEvent> {
        if pressed == self.pressed {
            return None;
        }
        let when = now_ms.max(self.last_change_ms);
        let event = ButtonEvent::new(self.pin, pressed, when, self.last_change_ms);
        self.pressed = pressed;
        self.last_change_ms = when;
        Some(event)
    }
}

/// An [`EdgeTracker`] bound to a physical input.
pub struct ButtonDriver<P> {
    input: P,
    active_low: bool,
    tracker: EdgeTracker,
}

impl<P: InputPin> ButtonDriver<P> {
    pub fn new(pin: LogicalPin, input: P, active_low: bool) -> Self {
        Self {
            input,
            active_low,
            tracker: EdgeTracker::new(pin),
        }
    }

    /// GPIO line this button is attached to.
    pub fn gpio(&self) -> i32 {
        self.tracker.pin().gpio()
    }

    /// Read the current level and adopt it silently.  A button already
    /// held when watching begins does not produce a press.
    pub fn prime(&mut self, now_ms: u64) -> Result<(), ChannelError> {
        let pressed = self.read_pressed()?;
        self.tracker.prime(pressed, now_ms);
        Ok(())
    }

    /// Sample the input once.
    pub fn poll(&mut self, now_ms: u64) -> Result<Option<ButtonEvent>, ChannelError> {
        let pressed = self.read_pressed()?;
        Ok(self.tracker.update(pressed, now_ms))
    }

    fn read_pressed(&mut self) -> Result<bool, ChannelError> {
        let gpio = self.gpio();
        let high = self.input.is_high().map_err(|e| ChannelError::PinRead {
            gpio,
            kind: e.kind(),
        })?;
        Ok(high != self.active_low)
    }
}
