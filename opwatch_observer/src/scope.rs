//! Scoped observation: the subscription is released on every exit path

use crate::config::ObserverConfig;
use crate::error::{ObserverError, ObserverResult};
use crate::observer::ErrorObserver;
use crate::source::NonFatalErrorSource;
use std::fmt::Display;
use std::ops::Deref;
use std::sync::Arc;

/// Owns an [`ErrorObserver`] and disposes it when dropped.
#[derive(Debug)]
pub struct ObservationScope {
    observer: ErrorObserver,
}

impl ObservationScope {
    /// Take ownership of an observer
    pub fn new(observer: ErrorObserver) -> Self {
        Self { observer }
    }

    /// Dispose, then run the checkpoint
    pub fn finish(self) -> ObserverResult<()> {
        self.observer.dispose();
        self.observer.validate()
    }
}

impl Deref for ObservationScope {
    type Target = ErrorObserver;

    fn deref(&self) -> &ErrorObserver {
        &self.observer
    }
}

impl Drop for ObservationScope {
    fn drop(&mut self) {
        self.observer.dispose();
    }
}

impl ErrorObserver {
    /// Wrap this observer so it is disposed at end of scope
    pub fn scoped(self) -> ObservationScope {
        ObservationScope::new(self)
    }
}

/// Run `work` while observing `session` with the default configuration.
///
/// See [`monitor_with_config`].
pub fn monitor<T, E, F>(session: Option<Arc<dyn NonFatalErrorSource>>, work: F) -> ObserverResult<T>
where
    F: FnOnce(&ErrorObserver) -> Result<T, E>,
    E: Display,
{
    monitor_with_config(session, ObserverConfig::default(), work)
}

/// Attach to `session`, run `work`, detach, then check.
///
/// The observer is disposed before this returns, whether `work` succeeds,
/// fails or panics. An error from `work` is returned as
/// [`ObserverError::Operation`] and takes precedence over observed failures.
pub fn monitor_with_config<T, E, F>(
    session: Option<Arc<dyn NonFatalErrorSource>>,
    config: ObserverConfig,
    work: F,
) -> ObserverResult<T>
where
    F: FnOnce(&ErrorObserver) -> Result<T, E>,
    E: Display,
{
    let scope = ErrorObserver::attach_with_config(session, config)?.scoped();
    let outcome = work(&scope);
    let checked = scope.finish();

    let value = outcome.map_err(|e| ObserverError::Operation(e.to_string()))?;
    checked?;
    Ok(value)
}
