//! Observer configuration

use opwatch::config::{ConfigError, Validate};
use opwatch::consts::DEFAULT_FAILURE_HEADER;
use serde::{Deserialize, Serialize};

/// Which error-severity message the observer keeps when several arrive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorRetention {
    /// Every qualifying error message replaces the previous one
    #[default]
    Latest,
    /// The first qualifying error message is kept for the observer's lifetime
    First,
}

/// Configuration for an [`ErrorObserver`](crate::ErrorObserver)
///
/// # TOML Example
///
/// ```toml
/// [observer]
/// retention = "first"
/// failure_header = "Checkin failed:"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObserverConfig {
    /// Retention policy for error-severity messages
    pub retention: ErrorRetention,
    /// First line of every observed-failure message
    pub failure_header: String,
}

impl Default for ObserverConfig {
    fn default() -> Self {
        Self {
            retention: ErrorRetention::default(),
            failure_header: DEFAULT_FAILURE_HEADER.to_string(),
        }
    }
}

impl ObserverConfig {
    /// Default configuration with a different retention policy
    pub fn with_retention(retention: ErrorRetention) -> Self {
        Self {
            retention,
            ..Self::default()
        }
    }
}

impl Validate for ObserverConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.failure_header.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "failure_header cannot be empty".to_string(),
            ));
        }
        if self.failure_header.contains(opwatch::consts::FAILURE_LINE_SEPARATOR) {
            return Err(ConfigError::ValidationError(
                "failure_header must be a single line".to_string(),
            ));
        }
        Ok(())
    }
}
