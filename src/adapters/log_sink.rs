//! Log-based button event sink.
//!
//! Writes every [`ButtonEvent`] to the logger (UART / USB-CDC on the
//! device).  The firmware entry point uses it as the watch handler; any
//! other consumer takes a plain closure instead.

use log::info;

use crate::app::events::ButtonEvent;

/// Adapter that logs every [`ButtonEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink {
    emitted: u64,
}

impl LogEventSink {
    pub fn new() -> Self {
        Self { emitted: 0 }
    }

    pub fn emit(&mut self, event: &ButtonEvent) {
        self.emitted += 1;
        if event.pressed {
            info!("BUTTON | {} down | t={}ms", event.pin, event.when);
        } else {
            info!(
                "BUTTON | {} up | t={}ms | held={}ms",
                event.pin,
                event.when,
                event.since_last_change()
            );
        }
    }

    /// Events logged so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }
}
