//! Adapters: concrete implementations behind the port traits.
//!
//! | Adapter    | Implements       | Connects to                      |
//! |------------|------------------|----------------------------------|
//! | `gpio`     | HardwareChannel  | embedded-hal input pins 37 / 39  |
//! | `log_sink` | (event handler)  | Serial log output                |
//! | `time`     |:                | ESP32 system timer / `Instant`   |

pub mod gpio;
pub mod log_sink;
pub mod time;
