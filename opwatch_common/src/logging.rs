//! `tracing` subscriber setup shared by opwatch binaries, demos and tests.

use crate::config::LogLevel;
use crate::consts::LOG_FILTER_ENV;
use tracing_subscriber::{EnvFilter, fmt};

/// Build the log filter: the `RUST_LOG` environment variable wins, otherwise
/// the configured level applies.
pub fn env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(level.as_directive()))
}

/// Initialize tracing with thread ids and line numbers.
///
/// Returns `false` when a global subscriber was already installed, in which
/// case the existing one is kept.
pub fn init_tracing(level: LogLevel) -> bool {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter(level))
        .with_target(false)
        .with_thread_ids(true)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber).is_ok()
}

/// Same as [`init_tracing`] but emits one JSON object per event.
pub fn init_json_tracing(level: LogLevel) -> bool {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(env_filter(level))
        .with_thread_ids(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber).is_ok()
}
