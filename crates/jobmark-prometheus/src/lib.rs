//! Pushgateway reporting for batch jobs.
//!
//! This crate provides [`PushMetrics`], a decorator over any [`jobmark_core::ProgressTracker`] that
//! keeps four gauges up to date and pushes them to a Prometheus Pushgateway at construction, after
//! every batch and when the job finishes.
//!
//! ## Example
//! ```rust,ignore
//! use jobmark_core::PushConfig;
//! use jobmark_prometheus::{GaugeRegistry, PushMetrics};
//!
//! let config = PushConfig::from_env()?;
//! let mut job = PushMetrics::from_config(tracker, GaugeRegistry::global(), &config, None)?;
//!
//! for batch in batches {
//!     job.incr(batch.len() as u64);
//!     job.on_batch(|t| tracing::info!(count = t.count(), "batch done"))?;
//! }
//! job.final_line()?;
//! ```
//!
//! ## Metrics
//! - `job_duration_seconds` - Gauge, seconds the job has been running
//! - `job_records_processed` - Gauge, records processed so far
//! - `job_last_success` - Gauge, unix time of the last `final_line`; absent until then
//! - `job_expected_success_interval` - Gauge, seconds; absent unless configured
//!
//! ## Failure isolation
//! Push failures are reported to an optional [`jobmark_core::PushObserver`] and never returned.
//! Only registry conflicts and invalid configuration surface as [`MetricsError`].

mod decorator;
pub use decorator::PushMetrics;

mod error;
pub use error::{MetricsError, MetricsResult, PushError};

mod push;
pub use push::{LABEL_INSTANCE, PushgatewayTransport, Pusher, Transport, TransportHandle};

mod registry;
pub use registry::GaugeRegistry;

pub use prometheus::{Encoder, Gauge, Registry, TextEncoder};
