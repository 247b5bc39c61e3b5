//! Workspace-wide constants for opwatch.
//!
//! Single source of truth for default message texts and paths.

/// Header line prepended to every observed-failure message raised by the
/// error observer checkpoint.
pub const DEFAULT_FAILURE_HEADER: &str =
    "The operation reported one or more errors and could not be completed:";

/// Separator placed between the failure header and the recorded detail.
pub const FAILURE_LINE_SEPARATOR: &str = "\n";

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/opwatch/opwatch.toml";

/// Environment variable consulted for a log filter override.
pub const LOG_FILTER_ENV: &str = "RUST_LOG";
