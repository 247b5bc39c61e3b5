//! Listener and notification-source contracts
//!
//! The session or client that performs the monitored operation implements
//! [`NonFatalErrorSource`]; anything that wants to hear about non-fatal errors
//! implements [`NonFatalErrorListener`] and registers itself.

use crate::event::NonFatalErrorEvent;
use std::sync::Arc;

/// Receives non-fatal error notifications.
///
/// Called on whatever thread the source delivers from, possibly concurrently.
/// Implementations must not panic.
pub trait NonFatalErrorListener: Send + Sync {
    /// Handle one notification
    fn on_non_fatal_error(&self, event: &NonFatalErrorEvent);
}

/// A subscribable stream of non-fatal error notifications
pub trait NonFatalErrorSource: Send + Sync {
    /// Register a listener
    fn add_non_fatal_error_listener(&self, listener: Arc<dyn NonFatalErrorListener>);

    /// Unregister a listener previously passed to
    /// [`add_non_fatal_error_listener`](Self::add_non_fatal_error_listener).
    ///
    /// Must be synchronous: once it returns, the listener receives no further
    /// deliveries that started after the call.
    fn remove_non_fatal_error_listener(&self, listener: &Arc<dyn NonFatalErrorListener>);
}

/// Identity comparison for registered listeners (data pointer only).
pub fn same_listener(a: &Arc<dyn NonFatalErrorListener>, b: &Arc<dyn NonFatalErrorListener>) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

impl<F> NonFatalErrorListener for F
where
    F: Fn(&NonFatalErrorEvent) + Send + Sync,
{
    fn on_non_fatal_error(&self, event: &NonFatalErrorEvent) {
        self(event)
    }
}
