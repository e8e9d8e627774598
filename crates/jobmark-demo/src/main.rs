use std::{sync::Arc, thread, time::Duration};

use tracing::info;

use jobmark_core::{ProgressTracker, PushConfig};
use jobmark_observe::{LoggerConfig, LoggerLevel, TracingObserver, init_logger};
use jobmark_prometheus::{Encoder, GaugeRegistry, PushMetrics, TextEncoder};

mod stopwatch;
use stopwatch::Stopwatch;

const BATCHES: u64 = 5;
const BATCH_SIZE: u64 = 100;

fn main() -> anyhow::Result<()> {
    // 1) logger
    let cfg = LoggerConfig {
        level: LoggerLevel::new("info,jobmark_prometheus=trace")?,
        ..Default::default()
    };
    init_logger(&cfg)?;

    // 2) push config from PUSHGATEWAY / JOB_SUCCESS_INTERVAL / JOB_NAMESPACE
    let push = PushConfig::from_env()?;
    info!(job = %push.job_name, endpoint = %push.endpoint, instance = %push.instance, "push config resolved");

    // 3) decorated tracker
    let registry = GaugeRegistry::global();
    let mut job = PushMetrics::from_config(
        Stopwatch::start(),
        registry.clone(),
        &push,
        Some(Arc::new(TracingObserver)),
    )?;

    // 4) fake work
    for _ in 0..BATCHES {
        thread::sleep(Duration::from_millis(200));
        job.incr(BATCH_SIZE);
        job.on_batch(|t| info!(batch = t.batches(), records = t.count(), "batch done"))?;
    }

    let summary = job.final_line()?;
    info!("{summary}");

    // 5) last pushed snapshot
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&registry.gather(), &mut buffer)?;
    print!("{}", String::from_utf8_lossy(&buffer));
    Ok(())
}
