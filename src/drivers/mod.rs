//! Button input driver and sampler thread helpers.

pub mod button;
pub mod task_pin;
