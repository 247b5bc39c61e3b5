//! Config loading tests: application configs embedding `SharedConfig`,
//! validation hooks and error mapping.

use opwatch_common::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig, Validate};
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize)]
struct AppConfig {
    shared: SharedConfig,
    #[serde(default)]
    retries: u8,
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        if self.retries > 10 {
            return Err(ConfigError::ValidationError(format!(
                "retries must be <= 10, got {}",
                self.retries
            )));
        }
        Ok(())
    }
}

#[test]
fn load_app_config_from_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("opwatch.toml");
    fs::write(
        &path,
        r#"
retries = 3

[shared]
log_level = "warn"
service_name = "nightly-sync"
"#,
    )
    .unwrap();

    let config = AppConfig::load_validated(&path).unwrap();
    assert_eq!(config.shared.log_level, LogLevel::Warn);
    assert_eq!(config.shared.service_name, "nightly-sync");
    assert_eq!(config.retries, 3);
}

#[test]
fn missing_shared_table_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("opwatch.toml");
    fs::write(&path, "retries = 1\n").unwrap();

    let err = AppConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)), "got {err:?}");
}

#[test]
fn nested_validation_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("opwatch.toml");
    fs::write(
        &path,
        r#"
retries = 42

[shared]
service_name = "svc"
"#,
    )
    .unwrap();

    match AppConfig::load_validated(&path) {
        Err(ConfigError::ValidationError(msg)) => assert!(msg.contains("retries")),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn unknown_log_level_is_rejected() {
    let result = AppConfig::from_toml_str(
        r#"
[shared]
log_level = "loud"
service_name = "svc"
"#,
    );
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn missing_file_maps_to_file_not_found() {
    let dir = TempDir::new().unwrap();
    let result = AppConfig::load(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound)));
}
