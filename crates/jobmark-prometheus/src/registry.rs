use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, LazyLock, Mutex},
};

use prometheus::{Gauge, Opts, Registry, proto::MetricFamily};
use tracing::debug;

use jobmark_core::MetricName;

use crate::error::{MetricsError, MetricsResult};

static GLOBAL: LazyLock<GaugeRegistry> =
    LazyLock::new(|| GaugeRegistry::with_registry(Arc::new(prometheus::default_registry().clone())));

/// Prometheus registry holding the job gauges.
///
/// Wraps a [`Registry`] together with an index of the gauges registered through it, so every
/// [`MetricName`] maps to exactly one [`Gauge`]. Clones share both the registry and the index.
///
/// Wrap a given prometheus registry once: two wrappers over the same registry do not see each
/// other's gauges and the second registration of a name fails with `AlreadyReg`.
#[derive(Clone)]
pub struct GaugeRegistry {
    registry: Arc<Registry>,
    gauges: Arc<Mutex<HashMap<MetricName, Gauge>>>,
}

impl GaugeRegistry {
    /// Create a gauge registry backed by a fresh prometheus registry.
    pub fn new() -> Self {
        Self::with_registry(Arc::new(Registry::new()))
    }

    /// Create a gauge registry backed by a custom prometheus registry.
    pub fn with_registry(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            gauges: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Process-wide gauge registry over [`prometheus::default_registry`].
    pub fn global() -> Self {
        GLOBAL.clone()
    }

    /// Return the gauge registered under `name`, registering it on first use.
    ///
    /// `help` is only applied when the gauge is created; later calls return the existing gauge
    /// untouched. Fails if the backing registry already holds a different collector with this
    /// name.
    pub fn get_or_register(&self, name: MetricName, help: &str) -> MetricsResult<Gauge> {
        let mut gauges = self.gauges.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(gauge) = gauges.get(&name) {
            return Ok(gauge.clone());
        }

        let register_err = |source| MetricsError::Register { name, source };
        let gauge = Gauge::with_opts(Opts::new(name.as_str(), help)).map_err(register_err)?;
        self.registry
            .register(Box::new(gauge.clone()))
            .map_err(register_err)?;

        debug!(metric = name.as_str(), "gauge registered");
        gauges.insert(name, gauge.clone());
        Ok(gauge)
    }

    /// Return the gauge registered under `name`, if any.
    pub fn get(&self, name: MetricName) -> Option<Gauge> {
        self.gauges
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(&name)
            .cloned()
    }

    /// Gather the current snapshot of every collector in the backing registry.
    pub fn gather(&self) -> Vec<MetricFamily> {
        self.registry.gather()
    }

    /// Get reference to underlying prometheus registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }
}

impl fmt::Debug for GaugeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let gauges = self.gauges.lock().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<_> = gauges.keys().map(|n| n.as_str()).collect();
        names.sort_unstable();
        f.debug_struct("GaugeRegistry")
            .field("gauges", &names)
            .finish_non_exhaustive()
    }
}

impl Default for GaugeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
