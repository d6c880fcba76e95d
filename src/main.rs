//! Button watcher firmware: main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  GpioChannel (GPIO 37 / 39, sampler thread on APP_CPU)   │
//! │  ─────────────── HardwareChannel port ───────────────    │
//! │  ButtonWatcher (run loop) ──▶ handler ──▶ LogEventSink   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Holding button B for `exit_hold_ms` and releasing it stops the watcher.
#![deny(unused_must_use)]

use core::convert::Infallible;

use anyhow::Result;
use esp_idf_hal::gpio::{InputPin, PinDriver};
use esp_idf_hal::peripherals::Peripherals;
use log::info;

use buttonwatch::adapters::gpio::GpioChannel;
use buttonwatch::adapters::log_sink::LogEventSink;
use buttonwatch::config::WatcherConfig;
use buttonwatch::{ButtonWatcher, LogicalPin, pins};

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("buttonwatch v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Config ─────────────────────────────────────────────
    let config = WatcherConfig::default();

    // ── 3. Inputs ─────────────────────────────────────────────
    // Lines are fixed by the board; keep in step with `pins`.
    let peripherals = Peripherals::take()?;
    let pin_a = PinDriver::input(peripherals.pins.gpio37.downgrade_input())?;
    let pin_b = PinDriver::input(peripherals.pins.gpio39.downgrade_input())?;
    info!(
        "Buttons: A=GPIO{} B=GPIO{} (active_low={})",
        pins::BUTTON_A_GPIO,
        pins::BUTTON_B_GPIO,
        config.active_low
    );

    // ── 4. Watch loop ─────────────────────────────────────────
    let watcher = ButtonWatcher::new(GpioChannel::new(&config, pin_a, pin_b)?);
    let mut sink = LogEventSink::new();
    let exit_hold_ms = u64::from(config.exit_hold_ms);

    watcher.run(config.wait_timeout(), |event| {
        sink.emit(&event);
        if event.pin == LogicalPin::B && event.released() && event.since_last_change() >= exit_hold_ms {
            info!("Button B held {}ms, stopping", event.since_last_change());
            watcher.stop();
        }
        Ok::<(), Infallible>(())
    })?;

    info!("Watcher stopped after {} events", sink.emitted());
    Ok(())
}
