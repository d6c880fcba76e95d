//! Watcher configuration parameters
//!
//! Tunables for the sampler and the watch loop.  Pin numbers are NOT here:
//! they are fixed by the board (see [`crate::pins`]).

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Core watcher configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    // --- Inputs ---
    /// Buttons read LOW when pressed
    pub active_low: bool,

    // --- Sampler ---
    /// Interval between pin samples (milliseconds)
    pub poll_interval_ms: u32,
    /// Pending events held before new ones are dropped
    pub queue_depth: usize,
    /// Sampler thread stack size (KiB)
    pub sampler_stack_kb: usize,

    // --- Watch loop ---
    /// Upper bound on each blocking wait (milliseconds)
    pub wait_timeout_ms: u32,
    /// Holding button B this long stops the firmware watcher (milliseconds)
    pub exit_hold_ms: u32,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            active_low: true,

            poll_interval_ms: 10, // 100 Hz
            queue_depth: 10,
            sampler_stack_kb: 4,

            wait_timeout_ms: 1000,
            exit_hold_ms: 3000,
        }
    }
}

impl WatcherConfig {
    /// Parse and validate a JSON document.  Missing fields take defaults.
    pub fn from_json(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_slice(bytes).map_err(|_| ConfigError::Corrupted)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would stall or spin the sampler or the loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed("poll_interval_ms must be > 0"));
        }
        if self.queue_depth == 0 {
            return Err(ConfigError::ValidationFailed("queue_depth must be > 0"));
        }
        if self.sampler_stack_kb == 0 {
            return Err(ConfigError::ValidationFailed("sampler_stack_kb must be > 0"));
        }
        if self.wait_timeout_ms == 0 {
            return Err(ConfigError::ValidationFailed("wait_timeout_ms must be > 0"));
        }
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(u64::from(self.poll_interval_ms))
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(u64::from(self.wait_timeout_ms))
    }
}
