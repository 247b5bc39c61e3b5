//! # opwatch Error Observer
//!
//! Bridges an external system's asynchronous, fire-and-forget non-fatal error
//! notifications to a synchronous check-then-proceed control flow.
//!
//! A session (anything implementing [`NonFatalErrorSource`]) pushes
//! [`NonFatalErrorEvent`]s on threads it controls. An [`ErrorObserver`]
//! attached to that session records the qualifying ones, and the caller asks
//! [`ErrorObserver::validate`] at a moment of its choosing whether the unit of
//! work should be treated as failed.
//!
//! ## Classification
//!
//! | Event | Effect |
//! |-------|--------|
//! | failure record at [`Severity::Error`] | message recorded; wins over any fault |
//! | no failure record, raw fault present | fault recorded |
//! | failure below error severity, or empty | ignored |
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────┐  add/remove   ┌─────────────────┐
//! │  Session        │◄──────────────┤  ErrorObserver  │
//! │ (EventEngine or │               │                 │
//! │  external impl) ├──────────────►│ [Mutex cell]    │
//! └─────────────────┘  on_non_      └────────┬────────┘
//!                      fatal_error           │ validate()
//!                                            ▼
//!                                   Ok(()) / ObservedFailure
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use opwatch_observer::{ErrorObserver, EventEngine, NonFatalErrorEvent, NonFatalErrorSource};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = Arc::new(EventEngine::new());
//! let session: Arc<dyn NonFatalErrorSource> = engine.clone();
//!
//! let observer = ErrorObserver::attach(Some(session))?.scoped();
//! engine.fire_non_fatal_error(&NonFatalErrorEvent::warning("item skipped"));
//! assert!(observer.validate().is_ok());
//!
//! engine.fire_non_fatal_error(&NonFatalErrorEvent::error("$/proj/a.txt is locked"));
//! let err = observer.finish().unwrap_err();
//! assert_eq!(err.failure_detail(), Some("$/proj/a.txt is locked"));
//! # Ok(())
//! # }
//! ```
//!
//! ### Monitoring disabled
//!
//! ```rust
//! use opwatch_observer::{ErrorObserver, EMPTY};
//!
//! fn checkpoint(observer: &ErrorObserver) -> bool {
//!     observer.validate().is_ok()
//! }
//!
//! assert!(checkpoint(&EMPTY));
//! ```
//!
//! ## Thread Safety
//!
//! - **ErrorObserver**: `Send + Sync`; notifications and `validate` may run concurrently
//! - **EventEngine**: `fire_non_fatal_error` may be called from many threads
//! - **EMPTY**: immutable, shareable everywhere

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod observer;
pub mod scope;
pub mod source;

pub use config::{ErrorRetention, ObserverConfig};
pub use engine::EventEngine;
pub use error::{ObserverError, ObserverResult};
pub use event::{CapturedFault, Classification, Failure, NonFatalErrorEvent, Severity};
pub use observer::{EMPTY, ErrorObserver, Observation, compose_failure_message};
pub use scope::{ObservationScope, monitor, monitor_with_config};
pub use source::{NonFatalErrorListener, NonFatalErrorSource};

/// Initialize tracing for demos and tests at the given level
pub fn init_tracing(level: opwatch::config::LogLevel) {
    let _ = opwatch::logging::init_tracing(level);
}
