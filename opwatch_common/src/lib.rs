//! opwatch Common Library
//!
//! This crate provides shared constants, configuration loading and logging
//! setup for all opwatch workspace crates.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and types
//! - [`consts`] - Workspace-wide constants and default message texts
//! - [`logging`] - `tracing` subscriber initialisation
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! Add to your `Cargo.toml` with alias for shorter imports:
//! ```toml
//! [dependencies]
//! opwatch = { package = "opwatch_common", path = "../opwatch_common" }
//! ```
//!
//! Then import:
//! ```rust
//! use opwatch_common::config::{ConfigLoader, SharedConfig};
//! use opwatch_common::consts::DEFAULT_FAILURE_HEADER;
//! ```

pub mod config;
pub mod consts;
pub mod logging;
pub mod prelude;
