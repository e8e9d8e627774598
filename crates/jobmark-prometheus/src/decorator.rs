use time::OffsetDateTime;

use jobmark_core::{MetricName, ObserverHandle, ProgressTracker, PushConfig};

use crate::{error::MetricsResult, push::Pusher, registry::GaugeRegistry};

/// Progress tracker decorated with Pushgateway reporting.
///
/// Wraps any [`ProgressTracker`] and keeps four gauges in step with it:
/// - `job_duration_seconds` and `job_records_processed` are refreshed and pushed at
///   construction, after every batch and on [`final_line`](PushMetrics::final_line);
/// - `job_last_success` is set to the current unix time by [`PushMetrics::final_line`] only;
/// - `job_expected_success_interval` is set once at construction, if an interval is given.
///
/// Push failures never reach the job. Errors returned here are fatal registry conflicts.
///
/// `incr`, `count` and `total_seconds_so_far` are forwarded without touching any gauge.
#[derive(Debug)]
pub struct PushMetrics<T> {
    tracker: T,
    reporter: Reporter,
}

impl<T: ProgressTracker> PushMetrics<T> {
    /// Wrap `tracker`, reporting through `registry` and `pusher`.
    ///
    /// Registers and pushes the initial snapshot before returning.
    pub fn new(
        tracker: T,
        registry: GaugeRegistry,
        pusher: Pusher,
        success_interval: Option<u64>,
    ) -> MetricsResult<Self> {
        let reporter = Reporter { registry, pusher };

        if let Some(secs) = success_interval {
            reporter.set(MetricName::JobExpectedSuccessInterval, secs as f64)?;
        }
        reporter.update_and_push(&tracker)?;

        Ok(Self { tracker, reporter })
    }

    /// Wrap `tracker` using a push configuration.
    ///
    /// Push failures go to `observer` when one is given.
    pub fn from_config(
        tracker: T,
        registry: GaugeRegistry,
        config: &PushConfig,
        observer: Option<ObserverHandle>,
    ) -> MetricsResult<Self> {
        let mut pusher = Pusher::new(config)?;
        if let Some(observer) = observer {
            pusher = pusher.with_observer(observer);
        }
        Self::new(tracker, registry, pusher, config.success_interval)
    }

    pub fn inner(&self) -> &T {
        &self.tracker
    }

    /// Mutable access to the wrapped tracker. Changes are not reported until the next batch.
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.tracker
    }

    pub fn into_inner(self) -> T {
        self.tracker
    }

    pub fn registry(&self) -> &GaugeRegistry {
        &self.reporter.registry
    }

    /// Forwarded to the wrapped tracker. No gauge is touched.
    #[inline]
    pub fn incr(&mut self, n: u64) {
        self.tracker.incr(n)
    }

    #[inline]
    pub fn count(&self) -> u64 {
        self.tracker.count()
    }

    #[inline]
    pub fn total_seconds_so_far(&self) -> f64 {
        self.tracker.total_seconds_so_far()
    }

    /// Run a batch boundary on the wrapped tracker.
    ///
    /// Order: tracker bookkeeping, `callback`, gauge refresh, push.
    /// Returns whatever the wrapped tracker's `on_batch` returns.
    pub fn on_batch<F>(&mut self, callback: F) -> MetricsResult<T::Batch>
    where
        F: FnOnce(&mut T),
    {
        let reporter = &self.reporter;
        let mut updated = Ok(());
        let out = self.tracker.on_batch(|tracker| {
            callback(tracker);
            updated = reporter.update_and_push(tracker);
        });
        updated?;
        Ok(out)
    }

    /// Record success, push, then finish the wrapped tracker.
    ///
    /// Returns the wrapped tracker's result unchanged. May be called more than once; each call
    /// moves `job_last_success` forward and pushes again.
    pub fn final_line(&mut self) -> MetricsResult<T::Final> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        self.reporter.set(MetricName::JobLastSuccess, now as f64)?;
        self.reporter.update_and_push(&self.tracker)?;
        Ok(self.tracker.final_line())
    }
}

#[derive(Debug)]
struct Reporter {
    registry: GaugeRegistry,
    pusher: Pusher,
}

impl Reporter {
    fn set(&self, name: MetricName, value: f64) -> MetricsResult<()> {
        self.registry.get_or_register(name, name.help())?.set(value);
        Ok(())
    }

    /// Copy duration and record count from `tracker`, then push the registry.
    /// The only place a push happens.
    fn update_and_push<T: ProgressTracker>(&self, tracker: &T) -> MetricsResult<()> {
        self.set(MetricName::JobDurationSeconds, tracker.total_seconds_so_far())?;
        self.set(MetricName::JobRecordsProcessed, tracker.count() as f64)?;
        self.pusher.push(&self.registry);
        Ok(())
    }
}
