//! Core capabilities for job metrics reporting.
//!
//! This crate holds the backend-agnostic pieces shared by the rest of the workspace:
//! - [`ProgressTracker`] is the capability a batch job's progress tracker exposes;
//! - [`MetricName`] is the fixed set of gauges reported for every job;
//! - [`PushObserver`] receives push failures (the optional "logger");
//! - [`PushConfig`] is the configuration object resolved before construction.
pub mod config;
pub mod error;
pub mod metrics;
pub mod tracker;

pub use config::PushConfig;
pub use error::{CoreError, CoreResult};
pub use metrics::{MetricName, NoOpObserver, ObserverHandle, PushObserver};
pub use tracker::ProgressTracker;

pub mod prelude {
    pub use crate::config::PushConfig;
    pub use crate::error::CoreError;
    pub use crate::metrics::{MetricName, PushObserver};
    pub use crate::tracker::ProgressTracker;
}
