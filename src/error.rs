//! Error types for the button watcher.
//!
//! - [`WatchError`] is what [`ButtonWatcher::run`](crate::app::watcher::ButtonWatcher::run)
//!   returns; it is generic over the channel's and the handler's error types
//!   so neither is erased.
//! - [`ChannelError`] covers the GPIO-backed channel.
//! - [`ConfigError`] covers [`WatcherConfig`](crate::config::WatcherConfig).
//!
//! The concrete leaf errors are `Copy`; nothing here allocates.

use core::fmt;

use embedded_hal::digital::ErrorKind;

// ---------------------------------------------------------------------------
// Watch loop errors
// ---------------------------------------------------------------------------

/// Every way a watch run can end other than a requested stop.
///
/// `C` is the hardware channel's error, `H` the handler's.  By the time a
/// caller sees any variant, the channel has already been stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchError<C, H> {
    /// The channel failed to start; the loop was never entered.
    Start(C),
    /// `wait_next` failed mid-loop.
    Wait(C),
    /// The handler rejected an event.
    Handler(H),
    /// Another `run` is already active on this watcher.
    AlreadyRunning,
    /// A zero wait timeout would turn the loop into a busy spin.
    ZeroTimeout,
}

impl<C: fmt::Display, H: fmt::Display> fmt::Display for WatchError<C, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(e) => write!(f, "channel start: {e}"),
            Self::Wait(e) => write!(f, "channel wait: {e}"),
            Self::Handler(e) => write!(f, "handler: {e}"),
            Self::AlreadyRunning => write!(f, "watcher already running"),
            Self::ZeroTimeout => write!(f, "wait timeout must be non-zero"),
        }
    }
}

impl<C, H> std::error::Error for WatchError<C, H>
where
    C: fmt::Debug + fmt::Display,
    H: fmt::Debug + fmt::Display,
{
}

// ---------------------------------------------------------------------------
// GPIO channel errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelError {
    /// `start` called while the sampler is already running.
    AlreadyStarted,
    /// `wait_next` called before `start`.
    NotStarted,
    /// The sampler thread could not be spawned.
    SpawnFailed,
    /// Reading a button input failed.
    PinRead { gpio: i32, kind: ErrorKind },
    /// The sampler thread exited (after a read failure or a panic).
    SamplerStopped,
}

impl fmt::Display for ChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "channel already started"),
            Self::NotStarted => write!(f, "channel not started"),
            Self::SpawnFailed => write!(f, "sampler thread spawn failed"),
            Self::PinRead { gpio, kind } => write!(f, "GPIO {gpio} read failed ({kind:?})"),
            Self::SamplerStopped => write!(f, "sampler stopped"),
        }
    }
}

impl std::error::Error for ChannelError {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config could not be deserialised.
    Corrupted,
    /// A field failed range validation.
    /// The `&'static str` names the field and the rule.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
