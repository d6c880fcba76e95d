//! GPIO hardware channel: a sampler thread feeding a bounded queue.
//!
//! ```text
//!  ┌───────────────┐  ButtonEvent   ┌──────────────┐  wait_next  ┌───────────────┐
//!  │ sampler thread│──────────────▶│ sync_channel │────────────▶│ ButtonWatcher │
//!  │ (every 10 ms) │  (try_send)    │  (depth 10)  │ recv_timeout│  (run loop)   │
//!  └───────────────┘                └──────────────┘             └───────────────┘
//! ```
//!
//! `start` primes both buttons and spawns the sampler; `stop` clears the
//! sampler's flag and joins it.  The buttons live behind an `Arc<Mutex<_>>`
//! so they survive any number of start/stop cycles.
//!
//! A full queue drops the new event with a warning rather than blocking the
//! sampler.  A pin read failure is forwarded once to the consumer and ends
//! sampling for the session.

use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use embedded_hal::digital::InputPin;
use log::{debug, info, warn};

use crate::adapters::time::MonotonicClock;
use crate::app::events::{ButtonEvent, LogicalPin};
use crate::app::ports::HardwareChannel;
use crate::config::WatcherConfig;
use crate::drivers::button::ButtonDriver;
use crate::drivers::task_pin::{Core, spawn_on_core};
use crate::error::{ChannelError, ConfigError};
use crate::pins;

type Buttons<P> = Arc<Mutex<[ButtonDriver<P>; 2]>>;
type Sample = Result<ButtonEvent, ChannelError>;

/// Live sampler state; exists only between `start` and `stop`.
struct Session {
    active: Arc<AtomicBool>,
    handle: JoinHandle<()>,
    rx: Receiver<Sample>,
}

impl Session {
    /// Signal the sampler and wait for it to exit.
    fn shutdown(self) {
        self.active.store(false, Ordering::Release);
        if self.handle.join().is_err() {
            warn!("GpioChannel: sampler thread panicked");
        }
    }
}

/// [`HardwareChannel`] over two `embedded-hal` input pins.
pub struct GpioChannel<P> {
    buttons: Buttons<P>,
    clock: MonotonicClock,
    poll_interval: Duration,
    queue_depth: usize,
    stack_kb: usize,
    session: Option<Session>,
}

impl<P> GpioChannel<P>
where
    P: InputPin + Send + 'static,
{
    /// `pin_a` must be wired to GPIO 37 and `pin_b` to GPIO 39.
    ///
    /// Fails when `config` does not pass [`WatcherConfig::validate`]: a zero
    /// queue depth would turn the queue into a rendezvous that drops every
    /// event, and a zero interval would spin the sampler.
    pub fn new(config: &WatcherConfig, pin_a: P, pin_b: P) -> Result<Self, ConfigError> {
        config.validate()?;
        let buttons = [
            ButtonDriver::new(LogicalPin::A, pin_a, config.active_low),
            ButtonDriver::new(LogicalPin::B, pin_b, config.active_low),
        ];
        Ok(Self {
            buttons: Arc::new(Mutex::new(buttons)),
            clock: MonotonicClock::new(),
            poll_interval: config.poll_interval(),
            queue_depth: config.queue_depth,
            stack_kb: config.sampler_stack_kb,
            session: None,
        })
    }

    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }
}

impl<P> HardwareChannel for GpioChannel<P>
where
    P: InputPin + Send + 'static,
{
    type Error = ChannelError;

    fn start(&mut self) -> Result<(), ChannelError> {
        if self.session.is_some() {
            return Err(ChannelError::AlreadyStarted);
        }

        let now = self.clock.now_ms();
        for button in lock_buttons(&self.buttons).iter_mut() {
            button.prime(now)?;
        }

        let (tx, rx) = mpsc::sync_channel(self.queue_depth);
        let active = Arc::new(AtomicBool::new(true));
        let sampler = Sampler {
            buttons: Arc::clone(&self.buttons),
            active: Arc::clone(&active),
            tx,
            clock: self.clock,
            interval: self.poll_interval,
        };

        let handle = spawn_on_core(
            Core::App,
            pins::SAMPLER_PRIORITY,
            self.stack_kb,
            "btn-sampler\0",
            move || sampler.run(),
        )
        .map_err(|e| {
            warn!("GpioChannel: sampler spawn failed: {}", e);
            ChannelError::SpawnFailed
        })?;

        self.session = Some(Session { active, handle, rx });
        info!(
            "GpioChannel: sampling GPIO {}/{} every {}ms",
            pins::BUTTON_A_GPIO,
            pins::BUTTON_B_GPIO,
            self.poll_interval.as_millis()
        );
        Ok(())
    }

    fn stop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        session.shutdown();
        info!("GpioChannel: sampling stopped");
    }

    fn wait_next(&mut self, timeout: Duration) -> Result<Option<ButtonEvent>, ChannelError> {
        let session = self.session.as_ref().ok_or(ChannelError::NotStarted)?;
        match session.rx.recv_timeout(timeout) {
            Ok(Ok(event)) => Ok(Some(event)),
            Ok(Err(e)) => Err(e),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(ChannelError::SamplerStopped),
        }
    }
}

impl<P> Drop for GpioChannel<P> {
    fn drop(&mut self) {
        if let Some(session) = self.session.take() {
            session.shutdown();
        }
    }
}

// ── Sampler thread ────────────────────────────────────────────

struct Sampler<P> {
    buttons: Buttons<P>,
    active: Arc<AtomicBool>,
    tx: SyncSender<Sample>,
    clock: MonotonicClock,
    interval: Duration,
}

impl<P: InputPin> Sampler<P> {
    fn run(self) {
        debug!("sampler: running");
        while self.active.load(Ordering::Acquire) {
            if !self.sample_once() {
                return;
            }
            std::thread::sleep(self.interval);
        }
        debug!("sampler: exiting");
    }

    /// One pass over both buttons.  `false` ends the sampler.
    fn sample_once(&self) -> bool {
        let now = self.clock.now_ms();
        let mut buttons = lock_buttons(&self.buttons);
        for button in buttons.iter_mut() {
            match button.poll(now) {
                Ok(Some(event)) => match self.tx.try_send(Ok(event)) {
                    Ok(()) => {}
                    Err(TrySendError::Full(_)) => warn!("sampler: queue full, dropped {}", event),
                    Err(TrySendError::Disconnected(_)) => return false,
                },
                Ok(None) => {}
                Err(e) => {
                    warn!("sampler: {}", e);
                    // Never block here: stop() may be joining this thread.
                    let _ = self.tx.try_send(Err(e));
                    return false;
                }
            }
        }
        true
    }
}

fn lock_buttons<P>(buttons: &Buttons<P>) -> MutexGuard<'_, [ButtonDriver<P>; 2]> {
    buttons
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
