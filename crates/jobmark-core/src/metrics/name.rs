use std::fmt;

/// Gauges reported for every decorated job.
///
/// Names are stable: dashboards and alerts at the collector depend on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricName {
    /// Seconds the job has been running so far.
    JobDurationSeconds,
    /// Unix time of the most recent successful completion.
    JobLastSuccess,
    /// Records processed by the job so far.
    JobRecordsProcessed,
    /// Maximum expected seconds between two successful completions.
    JobExpectedSuccessInterval,
}

impl MetricName {
    /// Every metric name, in exposition order.
    pub const ALL: [MetricName; 4] = [
        MetricName::JobDurationSeconds,
        MetricName::JobLastSuccess,
        MetricName::JobRecordsProcessed,
        MetricName::JobExpectedSuccessInterval,
    ];

    /// Return the metric name as exposed to the collector.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricName::JobDurationSeconds => "job_duration_seconds",
            MetricName::JobLastSuccess => "job_last_success",
            MetricName::JobRecordsProcessed => "job_records_processed",
            MetricName::JobExpectedSuccessInterval => "job_expected_success_interval",
        }
    }

    /// Return the fixed help text attached when the gauge is created.
    #[inline]
    pub fn help(&self) -> &'static str {
        match self {
            MetricName::JobDurationSeconds => "Time spent running job in seconds",
            MetricName::JobLastSuccess => "Last Unix time when job successfully completed",
            MetricName::JobRecordsProcessed => "Records processed by job",
            MetricName::JobExpectedSuccessInterval => {
                "Maximum expected time in seconds between job completions"
            }
        }
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
