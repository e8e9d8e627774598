use std::fmt;

use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::Subscriber;
use tracing_subscriber::{
    fmt::{format::Writer, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::{
    config::LoggerConfig,
    error::{LoggerError, LoggerResult},
    format::LoggerFormat,
};

/// RFC 3339 timestamps in UTC.
#[derive(Debug, Clone, Copy)]
pub struct UtcRfc3339;

impl FormatTime for UtcRfc3339 {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        match OffsetDateTime::now_utc().format(&Rfc3339) {
            Ok(ts) => write!(w, "{ts} "),
            Err(_) => write!(w, "<invalid-time> "),
        }
    }
}

/// Install the global tracing subscriber described by `cfg`.
///
/// Fails with [`LoggerError::AlreadyInitialized`] if a global subscriber is already set.
///
/// # Examples
/// ```rust
/// use jobmark_observe::{LoggerConfig, init_logger};
///
/// init_logger(&LoggerConfig::default()).expect("logger");
/// tracing::info!("ready");
/// ```
pub fn init_logger(cfg: &LoggerConfig) -> LoggerResult<()> {
    let filter = cfg.level.to_env_filter();
    let layer = tracing_subscriber::fmt::layer()
        .with_target(cfg.with_targets)
        .with_timer(UtcRfc3339);

    match cfg.format {
        LoggerFormat::Text => install(
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_ansi(cfg.should_use_color())),
        ),
        LoggerFormat::Json => install(
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.json().with_ansi(false)),
        ),
    }
}

fn install<S>(subscriber: S) -> LoggerResult<()>
where
    S: Subscriber + Send + Sync + 'static,
{
    subscriber
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_is_rejected() {
        let cfg = LoggerConfig {
            use_color: false,
            ..Default::default()
        };

        // Another test may already have installed one; only the second call is checked.
        let _ = init_logger(&cfg);
        let second = init_logger(&cfg);
        assert!(matches!(second, Err(LoggerError::AlreadyInitialized)));
    }

    #[test]
    fn timer_writes_rfc3339() {
        let mut out = String::new();
        UtcRfc3339.format_time(&mut Writer::new(&mut out)).unwrap();

        let ts = out.trim_end();
        assert!(ts.ends_with('Z'), "expected utc timestamp: {ts}");
        assert_eq!(&ts[4..5], "-");
        assert_eq!(&ts[10..11], "T");
    }
}
