use std::{collections::HashMap, fmt, sync::Arc};

use prometheus::proto::MetricFamily;
use tracing::trace;

use jobmark_core::{ObserverHandle, PushConfig, metrics::noop_observer};

use crate::{
    error::{MetricsResult, PushError},
    registry::GaugeRegistry,
};

/// Label carrying the instance in the grouping key.
pub const LABEL_INSTANCE: &str = "instance";

/// Delivery of a metrics snapshot to a collector.
///
/// A push replaces every series previously pushed under the same `job` and grouping key.
pub trait Transport: Send + Sync + 'static {
    /// Send `families` to the collector group identified by `job` and `grouping`.
    fn send(
        &self,
        job: &str,
        grouping: &HashMap<String, String>,
        families: Vec<MetricFamily>,
    ) -> Result<(), PushError>;
}

/// Shared handle to a push transport.
pub type TransportHandle = Arc<dyn Transport>;

/// Prometheus Pushgateway transport.
///
/// Uses an HTTP `PUT` so each push replaces the whole group. Timeouts are those of the
/// prometheus crate's HTTP client.
#[derive(Debug, Clone)]
pub struct PushgatewayTransport {
    endpoint: String,
}

impl PushgatewayTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for PushgatewayTransport {
    fn send(
        &self,
        job: &str,
        grouping: &HashMap<String, String>,
        families: Vec<MetricFamily>,
    ) -> Result<(), PushError> {
        prometheus::push_metrics(job, grouping.clone(), &self.endpoint, families, None).map_err(
            |source| PushError::Gateway {
                endpoint: self.endpoint.clone(),
                source,
            },
        )
    }
}

/// Pushes registry snapshots to a collector without ever failing the caller.
///
/// Transport failures are handed to the configured observer once and then dropped.
/// Without an observer they are discarded silently. No retries: the next push simply tries again.
#[derive(Clone)]
pub struct Pusher {
    job: String,
    grouping: HashMap<String, String>,
    transport: TransportHandle,
    observer: ObserverHandle,
}

impl Pusher {
    /// Create a pusher targeting the Pushgateway at `config.endpoint`.
    pub fn new(config: &PushConfig) -> MetricsResult<Self> {
        let transport = Arc::new(PushgatewayTransport::new(config.endpoint.clone()));
        Self::with_transport(config, transport)
    }

    /// Create a pusher with a custom transport.
    pub fn with_transport(config: &PushConfig, transport: TransportHandle) -> MetricsResult<Self> {
        config.validate()?;

        let mut grouping = HashMap::new();
        if !config.instance.is_empty() {
            grouping.insert(LABEL_INSTANCE.to_string(), config.instance.clone());
        }

        Ok(Self {
            job: config.job_name.clone(),
            grouping,
            transport,
            observer: noop_observer(),
        })
    }

    /// Report push failures to `observer`.
    pub fn with_observer(mut self, observer: ObserverHandle) -> Self {
        self.observer = observer;
        self
    }

    /// Job name the snapshots are grouped under.
    pub fn job(&self) -> &str {
        &self.job
    }

    /// Grouping labels sent alongside the job name.
    pub fn grouping(&self) -> &HashMap<String, String> {
        &self.grouping
    }

    /// Push the current snapshot of `registry`.
    ///
    /// Exactly one attempt is made. Failures never propagate.
    pub fn push(&self, registry: &GaugeRegistry) {
        match self
            .transport
            .send(&self.job, &self.grouping, registry.gather())
        {
            Ok(()) => trace!(job = %self.job, "metrics pushed"),
            Err(e) => self.observer.on_push_failure(&e.to_string()),
        }
    }
}

impl fmt::Debug for Pusher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pusher")
            .field("job", &self.job)
            .field("grouping", &self.grouping)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobmark_core::{CoreError, MetricName};
    use std::sync::Mutex;

    use crate::error::MetricsError;

    #[derive(Default)]
    struct RecordingTransport {
        pushes: Mutex<Vec<(String, HashMap<String, String>, Vec<String>)>>,
    }

    impl Transport for RecordingTransport {
        fn send(
            &self,
            job: &str,
            grouping: &HashMap<String, String>,
            families: Vec<MetricFamily>,
        ) -> Result<(), PushError> {
            let names = families.iter().map(|f| f.name().to_string()).collect();
            self.pushes
                .lock()
                .unwrap()
                .push((job.to_string(), grouping.clone(), names));
            Ok(())
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn send(
            &self,
            _: &str,
            _: &HashMap<String, String>,
            _: Vec<MetricFamily>,
        ) -> Result<(), PushError> {
            Err(PushError::Transport("connection refused".into()))
        }
    }

    fn recording_observer() -> (ObserverHandle, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let observer: ObserverHandle = Arc::new(move |msg: &str| {
            sink.lock().unwrap().push(msg.to_string());
        });
        (observer, seen)
    }

    fn config() -> PushConfig {
        PushConfig::default().with_job_name("nightly-import")
    }

    #[test]
    fn pushes_registry_snapshot_under_job() {
        let transport = Arc::new(RecordingTransport::default());
        let pusher = Pusher::with_transport(&config(), transport.clone()).unwrap();

        let registry = GaugeRegistry::new();
        registry
            .get_or_register(MetricName::JobRecordsProcessed, "records")
            .unwrap()
            .set(3.0);
        pusher.push(&registry);

        let pushes = transport.pushes.lock().unwrap();
        assert_eq!(pushes.len(), 1);
        assert_eq!(pushes[0].0, "nightly-import");
        assert!(pushes[0].1.is_empty());
        assert_eq!(pushes[0].2, vec!["job_records_processed"]);
    }

    #[test]
    fn instance_becomes_grouping_label() {
        let transport = Arc::new(RecordingTransport::default());
        let cfg = config().with_instance("override-instance");
        let pusher = Pusher::with_transport(&cfg, transport).unwrap();

        assert_eq!(
            pusher.grouping().get(LABEL_INSTANCE).map(String::as_str),
            Some("override-instance")
        );
    }

    #[test]
    fn failure_is_reported_once_to_observer() {
        let (observer, seen) = recording_observer();
        let pusher = Pusher::with_transport(&config(), Arc::new(FailingTransport))
            .unwrap()
            .with_observer(observer);

        pusher.push(&GaugeRegistry::new());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("connection refused"));
    }

    #[test]
    fn failure_without_observer_is_discarded() {
        let pusher = Pusher::with_transport(&config(), Arc::new(FailingTransport)).unwrap();
        pusher.push(&GaugeRegistry::new());
    }

    #[test]
    fn unreachable_gateway_does_not_escape() {
        let (observer, seen) = recording_observer();
        let cfg = config().with_endpoint("http://127.0.0.1:1");
        let pusher = Pusher::new(&cfg).unwrap().with_observer(observer);

        pusher.push(&GaugeRegistry::new());

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("http://127.0.0.1:1"));
    }

    #[test]
    fn invalid_config_is_fatal() {
        let cfg = config().with_job_name("a/b");
        let err = Pusher::new(&cfg).unwrap_err();
        assert!(matches!(err, MetricsError::Config(CoreError::InvalidConfig(_))));
    }
}
