//! Non-fatal error event payloads delivered by a notification source

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Severity classification of a structured failure record
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Information only
    Info,
    /// Warning - the operation continued
    Warning,
    /// Error - the item could not be processed
    Error,
}

impl Severity {
    /// Canonical lowercase label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured failure record attached to an event.
///
/// The record carries no text of its own; the event message describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    /// Severity of the failure
    pub severity: Severity,
    /// Machine-readable failure code, if the source supplies one
    pub code: Option<String>,
    /// Item (path, object name) the failure concerns
    pub item: Option<String>,
}

impl Failure {
    /// Failure with the given severity and no code or item
    pub fn new(severity: Severity) -> Self {
        Self {
            severity,
            code: None,
            item: None,
        }
    }

    /// Attach a failure code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Attach the affected item
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// Whether this failure is at exactly error severity
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Raw fault captured from the external system.
///
/// Cheap to clone; the display text of the wrapped error is what the
/// observer checkpoint reports.
#[derive(Clone)]
pub struct CapturedFault {
    inner: Arc<dyn Error + Send + Sync>,
}

#[derive(Debug, thiserror::Error)]
#[error("{0}")]
struct MessageFault(String);

impl CapturedFault {
    /// Capture an error value
    pub fn new<E>(error: E) -> Self
    where
        E: Error + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Capture a fault that only has a message
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(MessageFault(message.into()))
    }

    /// Human-readable text of the fault
    pub fn display_text(&self) -> String {
        self.inner.to_string()
    }

    /// The wrapped error
    pub fn error(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.inner.as_ref()
    }
}

impl fmt::Debug for CapturedFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CapturedFault").field(&self.inner).finish()
    }
}

impl fmt::Display for CapturedFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl From<std::io::Error> for CapturedFault {
    fn from(error: std::io::Error) -> Self {
        Self::new(error)
    }
}

/// How the observer treats a single event
#[derive(Debug, Clone, Copy)]
pub enum Classification<'a> {
    /// Error-severity failure record; the event message is recorded
    ErrorMessage(&'a str),
    /// No failure record but a raw fault; the fault is recorded
    Fault(&'a CapturedFault),
    /// Failure below error severity, or nothing to record
    Ignored,
}

/// Payload of a non-fatal error notification
#[derive(Debug, Clone)]
pub struct NonFatalErrorEvent {
    /// Structured failure record, if any
    pub failure: Option<Failure>,
    /// Raw fault, if any
    pub fault: Option<CapturedFault>,
    /// Message text describing the event
    pub message: String,
}

impl NonFatalErrorEvent {
    /// Event carrying a structured failure record
    pub fn with_failure(failure: Failure, message: impl Into<String>) -> Self {
        Self {
            failure: Some(failure),
            fault: None,
            message: message.into(),
        }
    }

    /// Error-severity failure event
    pub fn error(message: impl Into<String>) -> Self {
        Self::with_failure(Failure::new(Severity::Error), message)
    }

    /// Warning-severity failure event
    pub fn warning(message: impl Into<String>) -> Self {
        Self::with_failure(Failure::new(Severity::Warning), message)
    }

    /// Info-severity failure event
    pub fn info(message: impl Into<String>) -> Self {
        Self::with_failure(Failure::new(Severity::Info), message)
    }

    /// Event carrying only a raw fault; the message mirrors the fault text
    pub fn fault(fault: impl Into<CapturedFault>) -> Self {
        let fault = fault.into();
        Self {
            failure: None,
            message: fault.display_text(),
            fault: Some(fault),
        }
    }

    /// Event with neither failure record nor fault
    pub fn message_only(message: impl Into<String>) -> Self {
        Self {
            failure: None,
            fault: None,
            message: message.into(),
        }
    }

    /// Attach a raw fault to this event
    pub fn with_fault(mut self, fault: impl Into<CapturedFault>) -> Self {
        self.fault = Some(fault.into());
        self
    }

    /// Classify the event.
    ///
    /// An error-severity failure record always wins; a fault only counts when
    /// there is no failure record at all.
    pub fn classify(&self) -> Classification<'_> {
        match (&self.failure, &self.fault) {
            (Some(failure), _) if failure.is_error() => Classification::ErrorMessage(&self.message),
            (None, Some(fault)) => Classification::Fault(fault),
            _ => Classification::Ignored,
        }
    }
}
