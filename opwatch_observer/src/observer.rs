//! Error observer: records qualifying non-fatal errors and surfaces them at a
//! caller-chosen checkpoint

use crate::config::{ErrorRetention, ObserverConfig};
use crate::error::{ObserverError, ObserverResult};
use crate::event::{CapturedFault, Classification, NonFatalErrorEvent};
use crate::source::{NonFatalErrorListener, NonFatalErrorSource};
use opwatch::consts::FAILURE_LINE_SEPARATOR;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Shared no-op observer for call sites with no session to monitor.
///
/// `validate()` always succeeds and `dispose()` does nothing.
pub static EMPTY: ErrorObserver = ErrorObserver::empty();

/// Compose the two-line observed-failure message
pub fn compose_failure_message(header: &str, detail: &str) -> String {
    let mut message =
        String::with_capacity(header.len() + FAILURE_LINE_SEPARATOR.len() + detail.len());
    message.push_str(header);
    message.push_str(FAILURE_LINE_SEPARATOR);
    message.push_str(detail);
    message
}

/// Point-in-time copy of what an observer has recorded
#[derive(Debug, Clone, Default)]
pub struct Observation {
    /// Recorded error-severity message
    pub last_error_message: Option<String>,
    /// Most recent bare fault
    pub last_exception: Option<CapturedFault>,
    /// Error-severity events received
    pub error_events: u64,
    /// Bare-fault events received
    pub fault_events: u64,
    /// Events that did not qualify
    pub ignored_events: u64,
    /// Whether the observer has been disposed
    pub disposed: bool,
}

impl Observation {
    /// Detail line the checkpoint would report, if any
    pub fn failure_detail(&self) -> Option<String> {
        match (&self.last_error_message, &self.last_exception) {
            (Some(message), _) if !message.is_empty() => Some(message.clone()),
            (_, Some(fault)) => Some(fault.display_text()),
            _ => None,
        }
    }
}

/// Listener registered with the session. All state lives behind one lock so
/// classification and write are atomic per notification.
struct ErrorRecorder {
    retention: ErrorRetention,
    state: Mutex<Observation>,
}

impl ErrorRecorder {
    fn new(retention: ErrorRetention) -> Self {
        Self {
            retention,
            state: Mutex::new(Observation::default()),
        }
    }

    /// Mark disposed; returns `true` only for the first call
    fn close(&self) -> bool {
        let mut state = self.state.lock();
        !std::mem::replace(&mut state.disposed, true)
    }

    fn snapshot(&self) -> Observation {
        self.state.lock().clone()
    }
}

impl NonFatalErrorListener for ErrorRecorder {
    fn on_non_fatal_error(&self, event: &NonFatalErrorEvent) {
        let mut state = self.state.lock();
        if state.disposed {
            tracing::debug!(message = %event.message, "notification after dispose ignored");
            return;
        }

        match event.classify() {
            Classification::ErrorMessage(message) => {
                state.error_events += 1;
                let keep_existing = self.retention == ErrorRetention::First
                    && state
                        .last_error_message
                        .as_deref()
                        .is_some_and(|existing| !existing.is_empty());
                if !keep_existing {
                    state.last_error_message = Some(message.to_string());
                }
                tracing::warn!(
                    code = ?event.failure.as_ref().and_then(|f| f.code.as_deref()),
                    item = ?event.failure.as_ref().and_then(|f| f.item.as_deref()),
                    "non-fatal error recorded: {}",
                    message
                );
            }
            Classification::Fault(fault) => {
                state.fault_events += 1;
                state.last_exception = Some(fault.clone());
                tracing::warn!("non-fatal fault recorded: {}", fault);
            }
            Classification::Ignored => {
                state.ignored_events += 1;
                tracing::trace!(
                    severity = ?event.failure.as_ref().map(|f| f.severity),
                    "non-qualifying notification ignored"
                );
            }
        }
    }
}

struct Binding {
    session: Arc<dyn NonFatalErrorSource>,
    recorder: Arc<ErrorRecorder>,
    failure_header: String,
}

impl Binding {
    fn listener(&self) -> Arc<dyn NonFatalErrorListener> {
        self.recorder.clone()
    }
}

/// Observes a session's non-fatal error notifications and converts them into
/// an [`ObserverError::ObservedFailure`] when [`validate`](Self::validate) is
/// called.
///
/// An observer is single-use: recorded state is never cleared. Disposal is
/// explicit; wrap the observer in an [`ObservationScope`](crate::ObservationScope)
/// to release the subscription on every exit path.
pub struct ErrorObserver {
    binding: Option<Binding>,
}

impl ErrorObserver {
    /// Observer bound to no session
    pub const fn empty() -> Self {
        Self { binding: None }
    }

    /// Attach to a session with the default configuration.
    ///
    /// # Errors
    ///
    /// [`ObserverError::InvalidArgument`] if `session` is `None`.
    pub fn attach(session: Option<Arc<dyn NonFatalErrorSource>>) -> ObserverResult<Self> {
        Self::attach_with_config(session, ObserverConfig::default())
    }

    /// Attach to a session and subscribe to its non-fatal error stream.
    ///
    /// # Errors
    ///
    /// [`ObserverError::InvalidArgument`] if `session` is `None`; nothing is
    /// subscribed in that case.
    pub fn attach_with_config(
        session: Option<Arc<dyn NonFatalErrorSource>>,
        config: ObserverConfig,
    ) -> ObserverResult<Self> {
        let session = session.ok_or(ObserverError::InvalidArgument { name: "session" })?;

        let binding = Binding {
            session,
            recorder: Arc::new(ErrorRecorder::new(config.retention)),
            failure_header: config.failure_header,
        };
        binding
            .session
            .add_non_fatal_error_listener(binding.listener());
        tracing::debug!(retention = ?config.retention, "error observer attached");

        Ok(Self {
            binding: Some(binding),
        })
    }

    /// Checkpoint: fail if a qualifying error was recorded.
    ///
    /// An error-severity message takes priority over a captured fault. State
    /// is not cleared, so repeated calls give the same outcome.
    ///
    /// # Errors
    ///
    /// [`ObserverError::ObservedFailure`] carrying the header line and the
    /// recorded detail.
    pub fn validate(&self) -> ObserverResult<()> {
        let Some(binding) = &self.binding else {
            return Ok(());
        };

        match binding.recorder.snapshot().failure_detail() {
            Some(detail) => Err(ObserverError::ObservedFailure {
                message: compose_failure_message(&binding.failure_header, &detail),
            }),
            None => Ok(()),
        }
    }

    /// Unsubscribe from the session. Safe to call more than once.
    pub fn dispose(&self) {
        let Some(binding) = &self.binding else {
            return;
        };

        if binding.recorder.close() {
            binding
                .session
                .remove_non_fatal_error_listener(&binding.listener());
            tracing::debug!("error observer detached");
        }
    }

    /// Whether this observer is attached to a session
    pub fn is_bound(&self) -> bool {
        self.binding.is_some()
    }

    /// Whether [`dispose`](Self::dispose) has run on a bound observer
    pub fn is_disposed(&self) -> bool {
        self.binding
            .as_ref()
            .is_some_and(|b| b.recorder.state.lock().disposed)
    }

    /// Whether the next [`validate`](Self::validate) would fail
    pub fn has_failure(&self) -> bool {
        self.validate().is_err()
    }

    /// Copy of the recorded state; empty for an unbound observer
    pub fn snapshot(&self) -> Observation {
        self.binding
            .as_ref()
            .map(|b| b.recorder.snapshot())
            .unwrap_or_default()
    }
}

impl Default for ErrorObserver {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for ErrorObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorObserver")
            .field("bound", &self.is_bound())
            .field("observation", &self.snapshot())
            .finish()
    }
}
