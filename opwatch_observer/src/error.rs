//! Error types for observer operations

use opwatch::config::ConfigError;
use thiserror::Error;

/// Errors that can occur while attaching or checking an error observer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObserverError {
    /// A required argument was absent
    #[error("Invalid argument: {name} must not be null")]
    InvalidArgument {
        /// Name of the offending argument
        name: &'static str,
    },

    /// The monitored operation reported at least one qualifying non-fatal error
    #[error("{message}")]
    ObservedFailure {
        /// Header line and recorded detail, separated by a line break
        message: String,
    },

    /// The monitored unit of work itself returned an error
    #[error("Operation failed: {0}")]
    Operation(String),

    /// Observer configuration could not be loaded or validated
    #[error("Observer configuration error: {source}")]
    Config {
        /// Source configuration error
        #[from]
        source: ConfigError,
    },
}

impl ObserverError {
    /// Whether this error was raised by the observer checkpoint
    pub fn is_observed_failure(&self) -> bool {
        matches!(self, Self::ObservedFailure { .. })
    }

    /// Detail line of an observed failure (the text after the header)
    pub fn failure_detail(&self) -> Option<&str> {
        match self {
            Self::ObservedFailure { message } => message
                .split_once(opwatch::consts::FAILURE_LINE_SEPARATOR)
                .map(|(_, detail)| detail),
            _ => None,
        }
    }
}

/// Result type for observer operations
pub type ObserverResult<T> = Result<T, ObserverError>;
