//! Config-driven monitoring with `monitor_with_config` and the shared
//! no-op observer for disabled paths.
//!
//! Run with an optional TOML file:
//! `cargo run --example observer_monitor -- opwatch.toml`
//! Without an argument the default config path is tried, then a built-in
//! configuration is used.

use opwatch::config::{ConfigLoader, SharedConfig, Validate};
use opwatch::consts::DEFAULT_CONFIG_PATH;
use opwatch_observer::{
    EMPTY, ErrorObserver, EventEngine, NonFatalErrorEvent, NonFatalErrorSource, ObserverConfig,
    ObserverResult, init_tracing, monitor_with_config,
};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct DemoConfig {
    shared: SharedConfig,
    #[serde(default)]
    observer: ObserverConfig,
}

fn load_config() -> Result<DemoConfig, Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| Path::new(DEFAULT_CONFIG_PATH).exists().then(|| DEFAULT_CONFIG_PATH.to_string()));
    match path {
        Some(path) => {
            let config = DemoConfig::load(Path::new(&path))?;
            config.shared.validate()?;
            config.observer.validate()?;
            Ok(config)
        }
        None => Ok(DemoConfig::from_toml_str(
            r#"
[shared]
log_level = "debug"
service_name = "observer-demo"

[observer]
retention = "first"
failure_header = "Checkin failed:"
"#,
        )?),
    }
}

fn sync_items(observer: &ErrorObserver, engine: &EventEngine, items: &[&str]) -> Result<usize, String> {
    for item in items {
        if item.ends_with(".lock") {
            engine.fire_non_fatal_error(&NonFatalErrorEvent::error(format!("{item} is locked")));
        } else {
            engine.fire_non_fatal_error(&NonFatalErrorEvent::info(format!("{item} synced")));
        }
    }
    if observer.has_failure() {
        println!("  (failure already visible before the checkpoint)");
    }
    Ok(items.len())
}

fn run(config: &DemoConfig, monitoring: bool) -> ObserverResult<usize> {
    let engine = Arc::new(EventEngine::new());
    let items = ["a.txt", "b.lock", "c.txt", "d.lock"];

    if !monitoring {
        return sync_items(&EMPTY, &engine, &items).map_err(opwatch_observer::ObserverError::Operation);
    }

    let session: Arc<dyn NonFatalErrorSource> = engine.clone();
    monitor_with_config(Some(session), config.observer.clone(), |observer| {
        sync_items(observer, &engine, &items)
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    init_tracing(config.shared.log_level);
    println!("Service: {}", config.shared.service_name);

    match run(&config, false) {
        Ok(n) => println!("Monitoring disabled: {n} items processed"),
        Err(e) => println!("Monitoring disabled run failed: {e}"),
    }

    match run(&config, true) {
        Ok(n) => println!("Monitored run: {n} items processed"),
        Err(e) => println!("Monitored run failed:\n{e}"),
    }

    Ok(())
}
