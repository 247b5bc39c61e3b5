//! Prelude module for common re-exports.
//!
//! ```rust
//! use opwatch_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;
pub use crate::logging::init_tracing;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig, Validate};

// ─── Messages ───────────────────────────────────────────────────────
pub use crate::consts::{DEFAULT_FAILURE_HEADER, FAILURE_LINE_SEPARATOR};
