//! Concurrency tests: notifications delivered from many threads at once

use opwatch_observer::{
    CapturedFault, EMPTY, ErrorObserver, ErrorRetention, EventEngine, NonFatalErrorEvent,
    NonFatalErrorSource, ObserverConfig, ObserverResult,
};
use std::sync::{Arc, Barrier};
use std::thread;

const THREADS: usize = 8;
const EVENTS_PER_THREAD: usize = 250;

fn attach(engine: &Arc<EventEngine>, retention: ErrorRetention) -> ObserverResult<ErrorObserver> {
    let session: Arc<dyn NonFatalErrorSource> = engine.clone();
    ErrorObserver::attach_with_config(Some(session), ObserverConfig::with_retention(retention))
}

/// Every thread fires a mix of warnings and faults; one thread also fires
/// error-severity events. The error must win and nothing may be lost.
#[test]
fn test_concurrent_mixed_events_error_wins() -> ObserverResult<()> {
    let engine = Arc::new(EventEngine::new());
    let observer = attach(&engine, ErrorRetention::Latest)?;
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..EVENTS_PER_THREAD {
                    let event = match (t, i % 3) {
                        (0, 0) => NonFatalErrorEvent::error(format!("error {t}-{i}")),
                        (_, 1) => NonFatalErrorEvent::fault(CapturedFault::from_message(format!(
                            "fault {t}-{i}"
                        ))),
                        _ => NonFatalErrorEvent::warning(format!("warning {t}-{i}")),
                    };
                    engine.fire_non_fatal_error(&event);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let err = observer.validate().unwrap_err();
    let detail = err.failure_detail().unwrap();
    assert!(detail.starts_with("error 0-"), "unexpected detail: {detail}");

    let snapshot = observer.snapshot();
    let total = snapshot.error_events + snapshot.fault_events + snapshot.ignored_events;
    assert_eq!(total as usize, THREADS * EVENTS_PER_THREAD);

    observer.dispose();
    Ok(())
}

/// With first-wins retention, the surviving message is one that was
/// actually sent, never a mixture of two.
#[test]
fn test_concurrent_errors_no_torn_message() -> ObserverResult<()> {
    let engine = Arc::new(EventEngine::new());
    let observer = attach(&engine, ErrorRetention::First)?;
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let engine = Arc::clone(&engine);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                let message = format!("thread-{t}:").repeat(32);
                for _ in 0..EVENTS_PER_THREAD {
                    engine.fire_non_fatal_error(&NonFatalErrorEvent::error(message.clone()));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let err = observer.validate().unwrap_err();
    let detail = err.failure_detail().unwrap().to_string();
    let sent: Vec<String> = (0..THREADS).map(|t| format!("thread-{t}:").repeat(32)).collect();
    assert!(sent.contains(&detail), "torn message: {detail}");
    assert_eq!(observer.validate().unwrap_err(), err);

    observer.dispose();
    Ok(())
}

/// Checkpoints taken while notifications are still arriving never see a
/// partially written state: once an error is visible it stays visible.
#[test]
fn test_validate_during_delivery_is_monotonic() -> ObserverResult<()> {
    let engine = Arc::new(EventEngine::new());
    let observer = Arc::new(attach(&engine, ErrorRetention::Latest)?);

    let producer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for i in 0..2_000 {
                let event = if i == 500 {
                    NonFatalErrorEvent::error("the one error")
                } else {
                    NonFatalErrorEvent::warning(format!("warning {i}"))
                };
                engine.fire_non_fatal_error(&event);
            }
        })
    };

    let checker = {
        let observer = Arc::clone(&observer);
        thread::spawn(move || {
            let mut seen_error = false;
            for _ in 0..2_000 {
                match observer.validate() {
                    Ok(()) => assert!(!seen_error, "error disappeared after being observed"),
                    Err(err) => {
                        assert_eq!(err.failure_detail(), Some("the one error"));
                        seen_error = true;
                    }
                }
            }
        })
    };

    producer.join().unwrap();
    checker.join().unwrap();

    assert!(observer.validate().is_err());
    observer.dispose();
    Ok(())
}

/// Attaching and disposing observers from many threads leaves no
/// registrations behind.
#[test]
fn test_concurrent_attach_dispose() {
    let engine = Arc::new(EventEngine::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || -> ObserverResult<()> {
                for _ in 0..50 {
                    let observer = attach(&engine, ErrorRetention::Latest)?.scoped();
                    engine.fire_non_fatal_error(&NonFatalErrorEvent::info("tick"));
                    observer.validate()?;
                }
                Ok(())
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert_eq!(engine.listener_count(), 0);
}

#[test]
fn test_empty_observer_shared_across_threads() {
    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            thread::spawn(|| {
                for _ in 0..1_000 {
                    assert!(EMPTY.validate().is_ok());
                    EMPTY.dispose();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert!(!EMPTY.is_bound());
}
