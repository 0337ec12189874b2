//! One-way cache invalidation for views that render discovery results
//!
//! The orchestrator signals after every live (non-fallback) success so that
//! dependent views re-fetch on next navigation. Signals are fire-and-forget.

use tokio::sync::broadcast;

/// Receiver side of a path-scoped invalidation signal
pub trait ViewInvalidator: Send + Sync {
    fn invalidate(&self, path: &str);
}

/// Drops every signal. Used where no view cache exists (CLI).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvalidator;

impl ViewInvalidator for NoopInvalidator {
    fn invalidate(&self, path: &str) {
        tracing::trace!(path = %path, "Invalidation ignored");
    }
}

/// Publishes invalidated paths to any number of subscribed view caches
#[derive(Debug, Clone)]
pub struct BroadcastInvalidator {
    tx: broadcast::Sender<String>,
}

impl BroadcastInvalidator {
    /// A zero `capacity` is raised to 1
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastInvalidator {
    fn default() -> Self {
        Self::new(64)
    }
}

impl ViewInvalidator for BroadcastInvalidator {
    fn invalidate(&self, path: &str) {
        // No subscribers is fine; nobody has cached the view yet
        match self.tx.send(path.to_string()) {
            Ok(receivers) => tracing::debug!(path = %path, receivers, "View invalidated"),
            Err(_) => tracing::trace!(path = %path, "No view caches subscribed"),
        }
    }
}

impl<T: ViewInvalidator + ?Sized> ViewInvalidator for std::sync::Arc<T> {
    fn invalidate(&self, path: &str) {
        (**self).invalidate(path)
    }
}
