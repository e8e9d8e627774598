//! Logging for jobmark binaries.
//!
//! - [`init_logger`] installs a global `tracing` subscriber from a [`LoggerConfig`];
//! - [`TracingObserver`] reports failed metric pushes through `tracing`.
mod config;
mod error;
mod format;
mod level;
mod logger;
mod observer;

pub use config::LoggerConfig;
pub use error::{LoggerError, LoggerResult};
pub use format::LoggerFormat;
pub use level::LoggerLevel;
pub use logger::{UtcRfc3339, init_logger};
pub use observer::TracingObserver;
