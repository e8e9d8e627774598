use thiserror::Error;

use jobmark_core::{CoreError, MetricName};

/// Fatal errors raised by the decorator.
///
/// These indicate misuse (bad configuration, conflicting collectors) and are never retried.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("failed to register gauge {name}: {source}")]
    Register {
        name: MetricName,
        #[source]
        source: prometheus::Error,
    },

    #[error(transparent)]
    Config(#[from] CoreError),
}

/// Transient push failures.
///
/// Always caught by [`crate::Pusher`]; they never reach the decorated job.
#[derive(Debug, Error)]
pub enum PushError {
    #[error("failed to push metrics to {endpoint}: {source}")]
    Gateway {
        endpoint: String,
        #[source]
        source: prometheus::Error,
    },

    #[error("push transport error: {0}")]
    Transport(String),
}

pub type MetricsResult<T> = Result<T, MetricsError>;
