//! Basic usage example for the opwatch error observer
//! Demonstrates a background "server" pushing notifications while the caller
//! works, then a checkpoint deciding whether the unit of work failed.

use opwatch::config::LogLevel;
use opwatch_observer::{
    CapturedFault, ErrorObserver, EventEngine, NonFatalErrorEvent, NonFatalErrorSource,
    ObserverResult, init_tracing,
};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn pending_changes(engine: Arc<EventEngine>, fail: bool) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for i in 0..5 {
            engine.fire_non_fatal_error(&NonFatalErrorEvent::warning(format!(
                "$/proj/file{i}.txt unchanged, skipped"
            )));
            thread::sleep(Duration::from_millis(20));
        }
        if fail {
            engine.fire_non_fatal_error(&NonFatalErrorEvent::fault(CapturedFault::from_message(
                "connection reset by peer",
            )));
            engine.fire_non_fatal_error(&NonFatalErrorEvent::error(
                "$/proj/file3.txt is locked for check-out by another user",
            ));
        }
    })
}

fn unit_of_work(engine: &Arc<EventEngine>, fail: bool) -> ObserverResult<()> {
    let session: Arc<dyn NonFatalErrorSource> = engine.clone();
    let observer = ErrorObserver::attach(Some(session))?.scoped();

    pending_changes(Arc::clone(engine), fail)
        .join()
        .expect("worker thread panicked");

    observer.finish()
}

fn main() {
    init_tracing(LogLevel::Info);
    let engine = Arc::new(EventEngine::new());

    match unit_of_work(&engine, false) {
        Ok(()) => println!("Clean run: no qualifying errors"),
        Err(e) => println!("Clean run unexpectedly failed:\n{e}"),
    }

    match unit_of_work(&engine, true) {
        Ok(()) => println!("Failing run unexpectedly passed"),
        Err(e) => println!("Failing run surfaced:\n{e}"),
    }

    println!("Listeners left registered: {}", engine.listener_count());
}
