//! In-process event engine implementing [`NonFatalErrorSource`]

use crate::event::NonFatalErrorEvent;
use crate::source::{NonFatalErrorListener, NonFatalErrorSource, same_listener};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Listener registry and dispatcher for non-fatal error notifications.
///
/// Delivery works on a snapshot of the registry, so listeners may add or
/// remove registrations from inside their callback. Fire may be called from
/// any number of threads at once.
#[derive(Default)]
pub struct EventEngine {
    listeners: RwLock<Vec<Arc<dyn NonFatalErrorListener>>>,
    delivered: AtomicU64,
}

impl EventEngine {
    /// Create an engine with no listeners
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver an event to every registered listener
    pub fn fire_non_fatal_error(&self, event: &NonFatalErrorEvent) {
        let snapshot: Vec<_> = self.listeners.read().iter().cloned().collect();
        tracing::trace!(
            listeners = snapshot.len(),
            message = %event.message,
            "delivering non-fatal error"
        );
        for listener in &snapshot {
            listener.on_non_fatal_error(event);
        }
        self.delivered.fetch_add(snapshot.len() as u64, Ordering::Relaxed);
    }

    /// Number of currently registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Total listener invocations performed so far
    pub fn delivered_count(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }
}

impl NonFatalErrorSource for EventEngine {
    fn add_non_fatal_error_listener(&self, listener: Arc<dyn NonFatalErrorListener>) {
        let mut listeners = self.listeners.write();
        listeners.push(listener);
        tracing::debug!(listeners = listeners.len(), "non-fatal error listener added");
    }

    fn remove_non_fatal_error_listener(&self, listener: &Arc<dyn NonFatalErrorListener>) {
        let mut listeners = self.listeners.write();
        if let Some(pos) = listeners.iter().position(|l| same_listener(l, listener)) {
            listeners.remove(pos);
            tracing::debug!(listeners = listeners.len(), "non-fatal error listener removed");
        }
    }
}

impl std::fmt::Debug for EventEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEngine")
            .field("listeners", &self.listener_count())
            .field("delivered", &self.delivered_count())
            .finish()
    }
}
