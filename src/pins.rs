//! GPIO assignments for the two front-panel buttons.
//!
//! Single source of truth. The event record, the GPIO channel and the
//! firmware entry point all reference this module rather than hard-coding
//! pin numbers.
//!
//! Both lines are input-only on the ESP32 and are wired active-low with
//! external pull-ups on the board.

// ---------------------------------------------------------------------------
// Front-panel buttons
// ---------------------------------------------------------------------------

/// Button A (left / primary).
pub const BUTTON_A_GPIO: i32 = 37;
/// Button B (right / secondary).
pub const BUTTON_B_GPIO: i32 = 39;

// ---------------------------------------------------------------------------
// Sampler task
// ---------------------------------------------------------------------------

/// FreeRTOS priority of the pin sampler thread (just above idle).
pub const SAMPLER_PRIORITY: u8 = 1;
