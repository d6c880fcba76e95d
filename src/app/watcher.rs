//! Button watcher: the event-watch loop.
//!
//! [`ButtonWatcher`] owns a [`HardwareChannel`] and a single atomic
//! `running` flag.  [`run`](ButtonWatcher::run) starts the channel, blocks
//! on it one bounded wait at a time and hands every event to the caller's
//! handler on the calling thread.  [`stop`](ButtonWatcher::stop) clears the
//! flag from anywhere (another thread, or the handler itself); the loop sees
//! it at the next iteration boundary.
//!
//! ```text
//!  run ─▶ start ─▶ ┌─ running? ─▶ wait_next(timeout) ─▶ handler(event) ─┐
//!                  └──────────────────────────────────────────────────────┘
//!                        │ (stop / error / panic)
//!                        ▼
//!                  channel.stop() : exactly once, via RunGuard::drop
//! ```

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use std::sync::{Mutex, MutexGuard, TryLockError};

use log::{debug, info, trace, warn};

use super::events::ButtonEvent;
use super::ports::HardwareChannel;
use crate::error::WatchError;

// ───────────────────────────────────────────────────────────────
// ButtonWatcher
// ───────────────────────────────────────────────────────────────

pub struct ButtonWatcher<C> {
    /// Held for the whole of a run; a second concurrent run fails `try_lock`.
    channel: Mutex<C>,
    running: AtomicBool,
}

impl<C: HardwareChannel> ButtonWatcher<C> {
    /// Wrap a channel.  Nothing is started until [`run`](Self::run).
    pub fn new(channel: C) -> Self {
        Self {
            channel: Mutex::new(channel),
            running: AtomicBool::new(false),
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Watch for button events until stopped or until something fails.
    ///
    /// Each `wait_next` call gets the full `timeout`; a quiet timeout just
    /// re-polls.  `handler` runs synchronously and the next wait does not
    /// begin until it returns.  Whatever ends the loop, the channel is
    /// stopped exactly once before this returns (or unwinds).
    pub fn run<F, E>(&self, timeout: Duration, mut handler: F) -> Result<(), WatchError<C::Error, E>>
    where
        F: FnMut(ButtonEvent) -> Result<(), E>,
    {
        if timeout.is_zero() {
            return Err(WatchError::ZeroTimeout);
        }
        let Some(mut channel) = self.lock_channel() else {
            return Err(WatchError::AlreadyRunning);
        };

        // Dropping the guard stops the channel, on every path from here on.
        let mut guard = RunGuard {
            channel: &mut *channel,
            running: &self.running,
        };

        guard.channel.start().map_err(WatchError::Start)?;
        self.running.store(true, Ordering::Release);
        info!("ButtonWatcher started (timeout={}ms)", timeout.as_millis());

        let mut dispatched: u64 = 0;
        while self.running.load(Ordering::Acquire) {
            match guard.channel.wait_next(timeout).map_err(WatchError::Wait)? {
                Some(event) => {
                    debug!("dispatch {}", event);
                    handler(event).map_err(WatchError::Handler)?;
                    dispatched += 1;
                }
                None => trace!("wait timed out, re-polling"),
            }
        }

        info!("ButtonWatcher stop requested after {} events", dispatched);
        Ok(())
    }

    /// Ask the loop to exit after the current wait or dispatch.
    ///
    /// Never blocks and never fails; a no-op when nothing is running.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Give the channel back.  A run that panicked does not prevent this.
    pub fn into_channel(self) -> C {
        self.channel
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    // ── Internal ──────────────────────────────────────────────

    /// `None` while another run holds the channel.
    fn lock_channel(&self) -> Option<MutexGuard<'_, C>> {
        match self.channel.try_lock() {
            Ok(channel) => Some(channel),
            Err(TryLockError::WouldBlock) => None,
            Err(TryLockError::Poisoned(poisoned)) => {
                // A previous handler panicked; its guard already stopped the channel.
                warn!("ButtonWatcher: recovering channel after a panicked run");
                Some(poisoned.into_inner())
            }
        }
    }
}

// ───────────────────────────────────────────────────────────────
// RunGuard
// ───────────────────────────────────────────────────────────────

/// Scoped ownership of the channel for one run.
struct RunGuard<'a, C: HardwareChannel> {
    channel: &'a mut C,
    running: &'a AtomicBool,
}

impl<C: HardwareChannel> Drop for RunGuard<'_, C> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Release);
        self.channel.stop();
        debug!("ButtonWatcher: channel stopped");
    }
}
