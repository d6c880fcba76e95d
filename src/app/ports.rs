//! Port traits: the hexagonal boundary between the watch loop and the
//! button hardware.
//!
//! ```text
//!   GpioChannel / FakeChannel ──▶ HardwareChannel ──▶ ButtonWatcher
//! ```
//!
//! The [`ButtonWatcher`](super::watcher::ButtonWatcher) is generic over this
//! trait, so the loop never touches GPIO registers directly and can be
//! driven by a scripted channel in tests.

use core::fmt;
use core::time::Duration;

use super::events::ButtonEvent;

// ───────────────────────────────────────────────────────────────
// Hardware channel (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Blocking source of button transitions for the two fixed pins.
///
/// One watch run calls `start` once, `wait_next` any number of times, then
/// `stop` exactly once, including when `start` or `wait_next` failed.
pub trait HardwareChannel {
    type Error: fmt::Debug + fmt::Display;

    /// Begin observing both pins.  Not assumed idempotent.
    fn start(&mut self) -> Result<(), Self::Error>;

    /// Stop observing.  Must be safe after a failed or missing `start`.
    fn stop(&mut self);

    /// Block until the next transition or until `timeout` elapses.
    ///
    /// `Ok(None)` means the timeout expired quietly; it is not an error.
    fn wait_next(&mut self, timeout: Duration) -> Result<Option<ButtonEvent>, Self::Error>;
}
