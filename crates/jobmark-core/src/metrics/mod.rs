//! Metric identity and push-failure reporting.
//!
//! The four job gauges are a closed set described by [`MetricName`].
//! Push failures are never propagated to the job; they are handed to a [`PushObserver`] instead.
mod name;
pub use name::MetricName;

mod observer;
pub use observer::{NoOpObserver, ObserverHandle, PushObserver};

use std::sync::Arc;

/// Create a no-op observer handle.
#[inline]
pub fn noop_observer() -> ObserverHandle {
    Arc::new(NoOpObserver)
}
