use std::sync::Arc;

/// Receives push failures.
///
/// Reporting is best-effort: a failed push is handed to the observer exactly once and then dropped.
/// Any `Fn(&str)` closure is an observer.
pub trait PushObserver: Send + Sync + 'static {
    /// Called with a human-readable description of a failed push.
    fn on_push_failure(&self, message: &str);
}

impl<F> PushObserver for F
where
    F: Fn(&str) + Send + Sync + 'static,
{
    fn on_push_failure(&self, message: &str) {
        self(message)
    }
}

/// Shared handle to a push observer.
pub type ObserverHandle = Arc<dyn PushObserver>;

/// Observer that discards every failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl PushObserver for NoOpObserver {
    #[inline(always)]
    fn on_push_failure(&self, _: &str) {}
}
