use tracing::error;

use jobmark_core::PushObserver;

/// Push observer that logs failures at `error` level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl PushObserver for TracingObserver {
    fn on_push_failure(&self, message: &str) {
        error!(reason = message, "metrics push failed");
    }
}
