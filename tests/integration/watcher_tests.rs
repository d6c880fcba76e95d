//! Watch loop lifecycle against the scripted fake channel.

use std::sync::Arc;
use std::time::Duration;

use buttonwatch::{ButtonEvent, ButtonWatcher, LogicalPin, WatchError};

use crate::mock_hw::{Call, FakeChannel, FakeError, Step, press_release_events};

const TIMEOUT: Duration = Duration::from_millis(10);

fn ok(_: ButtonEvent) -> Result<(), &'static str> {
    Ok(())
}

/// Spin until `w` reports running, or give up after a second.
fn wait_until_running<C: buttonwatch::HardwareChannel>(w: &ButtonWatcher<C>) {
    for _ in 0..1000 {
        if w.is_running() {
            return;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    panic!("watcher never started");
}

#[test]
fn dispatches_every_event_once_in_order() {
    let events = press_release_events(LogicalPin::A, 6);
    let watcher = ButtonWatcher::new(FakeChannel::with_events(&events));

    let mut seen = Vec::new();
    let result = watcher.run(TIMEOUT, |ev| {
        seen.push(ev);
        Ok::<(), &str>(())
    });

    // The script ends with an exhausted-wait failure.
    assert_eq!(result, Err(WatchError::Wait(FakeError::Exhausted)));
    assert_eq!(seen, events);
    let ch = watcher.into_channel();
    assert_eq!(ch.count(Call::Start), 1);
    assert_eq!(ch.count(Call::Stop), 1);
    assert_eq!(ch.calls.last(), Some(&Call::Stop));
}

#[test]
fn press_release_then_stop_from_handler() {
    let press = ButtonEvent::new(LogicalPin::A, true, 100, 0);
    let release = ButtonEvent::new(LogicalPin::A, false, 150, 100);
    let watcher = ButtonWatcher::new(FakeChannel::with_events(&[press, release]));

    let mut seen = Vec::new();
    let result = watcher.run(TIMEOUT, |ev| {
        seen.push(ev);
        if seen.len() == 2 {
            watcher.stop();
        }
        Ok::<(), &str>(())
    });

    assert_eq!(result, Ok(()));
    assert_eq!(seen, vec![press, release]);
    assert_eq!(
        watcher.into_channel().calls,
        vec![Call::Start, Call::Wait, Call::Wait, Call::Stop]
    );
}

#[test]
fn stop_before_run_does_not_block_run() {
    let events = press_release_events(LogicalPin::B, 2);
    let watcher = ButtonWatcher::new(FakeChannel::with_events(&events));
    watcher.stop();

    let mut count = 0;
    let result = watcher.run(TIMEOUT, |_| {
        count += 1;
        watcher.stop();
        Ok::<(), &str>(())
    });

    assert_eq!(result, Ok(()));
    assert_eq!(count, 1);
}

#[test]
fn stop_from_handler_halts_further_waits() {
    let events = press_release_events(LogicalPin::A, 5);
    let watcher = ButtonWatcher::new(FakeChannel::with_events(&events));

    let mut seen = 0;
    watcher
        .run(TIMEOUT, |ev| {
            seen += 1;
            if ev.when == 150 {
                watcher.stop();
            }
            Ok::<(), &str>(())
        })
        .unwrap();

    assert_eq!(seen, 3);
    assert!(!watcher.is_running());
    let ch = watcher.into_channel();
    assert_eq!(ch.count(Call::Wait), 3);
    assert_eq!(ch.count(Call::Stop), 1);
}

#[test]
fn timeouts_never_reach_the_handler() {
    let steps = std::iter::repeat_n(Step::Timeout, 5).chain([Step::Fail]);
    let watcher = ButtonWatcher::new(FakeChannel::new(steps));

    let mut calls = 0;
    let result = watcher.run(TIMEOUT, |_| {
        calls += 1;
        Ok::<(), &str>(())
    });

    assert_eq!(calls, 0);
    assert_eq!(result, Err(WatchError::Wait(FakeError::WaitFailed)));
    let ch = watcher.into_channel();
    // Five quiet waits kept the loop alive until the sixth failed.
    assert_eq!(ch.count(Call::Wait), 6);
    assert_eq!(ch.count(Call::Stop), 1);
}

#[test]
fn running_stays_true_across_quiet_waits() {
    let watcher = Arc::new(ButtonWatcher::new(FakeChannel::idle()));

    let worker = {
        let watcher = Arc::clone(&watcher);
        std::thread::spawn(move || watcher.run(TIMEOUT, ok))
    };
    wait_until_running(&watcher);

    // Sample the flag over several timeout periods.
    for _ in 0..10 {
        assert!(watcher.is_running(), "a quiet wait must not clear running");
        std::thread::sleep(TIMEOUT / 2);
    }

    watcher.stop();
    assert_eq!(worker.join().unwrap(), Ok(()));
    let ch = Arc::into_inner(watcher).unwrap().into_channel();
    assert!(ch.count(Call::Wait) >= 3, "waits={}", ch.count(Call::Wait));
    assert_eq!(ch.count(Call::Stop), 1);
}

#[test]
fn timeouts_interleaved_with_events_keep_order() {
    let a = ButtonEvent::new(LogicalPin::A, true, 10, 0);
    let b = ButtonEvent::new(LogicalPin::B, true, 12, 0);
    let steps = [Step::Timeout, Step::Event(a), Step::Timeout, Step::Timeout, Step::Event(b)];
    let watcher = ButtonWatcher::new(FakeChannel::new(steps));

    let mut seen = Vec::new();
    let _ = watcher.run(TIMEOUT, |ev| {
        seen.push(ev.pin);
        Ok::<(), &str>(())
    });

    assert_eq!(seen, vec![LogicalPin::A, LogicalPin::B]);
}

#[test]
fn handler_failure_stops_channel_once_before_returning() {
    let events = press_release_events(LogicalPin::A, 4);
    let watcher = ButtonWatcher::new(FakeChannel::with_events(&events));

    let mut n = 0;
    let result = watcher.run(TIMEOUT, |_| {
        n += 1;
        if n == 2 { Err("boom") } else { Ok(()) }
    });

    assert_eq!(result, Err(WatchError::Handler("boom")));
    assert!(!watcher.is_running());
    assert_eq!(
        watcher.into_channel().calls,
        vec![Call::Start, Call::Wait, Call::Wait, Call::Stop]
    );
}

#[test]
fn start_failure_skips_loop_but_still_stops() {
    let watcher = ButtonWatcher::new(FakeChannel::failing_start());

    let result = watcher.run(TIMEOUT, ok);

    assert_eq!(result, Err(WatchError::Start(FakeError::StartRefused)));
    assert!(!watcher.is_running());
    assert_eq!(watcher.into_channel().calls, vec![Call::Start, Call::Stop]);
}

#[test]
fn wait_failure_propagates_after_stop() {
    let a = ButtonEvent::new(LogicalPin::A, true, 10, 0);
    let watcher = ButtonWatcher::new(FakeChannel::new([Step::Event(a), Step::Fail, Step::Event(a)]));

    let mut seen = 0;
    let result = watcher.run(TIMEOUT, |_| {
        seen += 1;
        Ok::<(), &str>(())
    });

    assert_eq!(result, Err(WatchError::Wait(FakeError::WaitFailed)));
    assert_eq!(seen, 1);
    assert_eq!(watcher.into_channel().count(Call::Stop), 1);
}

#[test]
fn handler_panic_still_stops_channel() {
    let events = press_release_events(LogicalPin::B, 3);
    let watcher = ButtonWatcher::new(FakeChannel::with_events(&events));

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        watcher.run(TIMEOUT, |ev| {
            assert!(ev.when < 100, "handler blew up");
            Ok::<(), &str>(())
        })
    }));
    assert!(outcome.is_err());
    assert!(!watcher.is_running());

    // The watcher stays usable: the remaining script is replayed.
    let mut seen = Vec::new();
    let result = watcher.run(TIMEOUT, |ev| {
        seen.push(ev.when);
        Ok::<(), &str>(())
    });
    assert_eq!(result, Err(WatchError::Wait(FakeError::Exhausted)));
    assert_eq!(seen, vec![150]);
    assert_eq!(watcher.into_channel().count(Call::Stop), 2);
}

#[test]
fn stop_from_another_thread_ends_run() {
    let watcher = Arc::new(ButtonWatcher::new(FakeChannel::idle()));

    let worker = {
        let watcher = Arc::clone(&watcher);
        std::thread::spawn(move || watcher.run(TIMEOUT, ok))
    };

    wait_until_running(&watcher);
    watcher.stop();
    assert_eq!(worker.join().unwrap(), Ok(()));

    let ch = Arc::into_inner(watcher).unwrap().into_channel();
    assert_eq!(ch.count(Call::Start), 1);
    assert_eq!(ch.count(Call::Stop), 1);
    assert!(ch.count(Call::Wait) >= 1);
}

#[test]
fn second_concurrent_run_is_rejected() {
    let watcher = Arc::new(ButtonWatcher::new(FakeChannel::idle()));

    let worker = {
        let watcher = Arc::clone(&watcher);
        std::thread::spawn(move || watcher.run(TIMEOUT, ok))
    };
    wait_until_running(&watcher);

    assert_eq!(watcher.run(TIMEOUT, ok), Err(WatchError::AlreadyRunning));
    assert!(watcher.is_running(), "rejected run must not disturb the active one");

    watcher.stop();
    assert_eq!(worker.join().unwrap(), Ok(()));
}

#[test]
fn zero_timeout_is_rejected() {
    let watcher = ButtonWatcher::new(FakeChannel::idle());
    assert_eq!(watcher.run(Duration::ZERO, ok), Err(WatchError::ZeroTimeout));
    assert!(watcher.into_channel().calls.is_empty());
}
