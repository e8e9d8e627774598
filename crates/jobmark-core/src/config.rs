use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Collector address used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:9091";

/// Environment variable holding the collector address.
pub const ENV_ENDPOINT: &str = "PUSHGATEWAY";
/// Environment variable holding the expected success interval in seconds.
pub const ENV_SUCCESS_INTERVAL: &str = "JOB_SUCCESS_INTERVAL";
/// Environment variable holding the instance label value.
pub const ENV_INSTANCE: &str = "JOB_NAMESPACE";

/// Push configuration for a decorated job.
///
/// Defaults are resolved once, at construction of the config, never lazily by the decorator.
/// Use [`PushConfig::from_env`] to layer the process environment over the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PushConfig {
    /// Job identifier grouping the pushed series at the collector.
    pub job_name: String,
    /// Collector URL (e.g. `http://localhost:9091`).
    pub endpoint: String,
    /// Instance label value; empty means "no instance".
    pub instance: String,
    /// Expected seconds between successful completions, if known.
    pub success_interval: Option<u64>,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            job_name: program_name(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            instance: String::new(),
            success_interval: None,
        }
    }
}

impl PushConfig {
    /// Build a config from the process environment.
    ///
    /// Recognized variables: `PUSHGATEWAY`, `JOB_SUCCESS_INTERVAL`, `JOB_NAMESPACE`.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut cfg = Self::default();

        if let Some(endpoint) = get(ENV_ENDPOINT) {
            cfg.endpoint = endpoint;
        }
        if let Some(instance) = get(ENV_INSTANCE) {
            cfg.instance = instance;
        }
        if let Some(raw) = get(ENV_SUCCESS_INTERVAL) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| CoreError::InvalidInterval {
                    key: ENV_SUCCESS_INTERVAL,
                    value: raw.clone(),
                })?;
            cfg.success_interval = Some(secs);
        }
        Ok(cfg)
    }

    /// Override the job name.
    pub fn with_job_name(mut self, job_name: impl Into<String>) -> Self {
        self.job_name = job_name.into();
        self
    }

    /// Override the collector endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Override the instance label value.
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = instance.into();
        self
    }

    /// Set the expected success interval in seconds.
    pub fn with_success_interval(mut self, secs: u64) -> Self {
        self.success_interval = Some(secs);
        self
    }

    /// Check the config can address a collector group.
    ///
    /// Job name and instance become URL path segments at the collector, so they must not contain `/`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.job_name.trim().is_empty() {
            return Err(CoreError::InvalidConfig("job name is empty".into()));
        }
        if self.job_name.contains('/') {
            return Err(CoreError::InvalidConfig(format!(
                "job name contains '/': {}",
                self.job_name
            )));
        }
        if self.instance.contains('/') {
            return Err(CoreError::InvalidConfig(format!(
                "instance contains '/': {}",
                self.instance
            )));
        }
        if self.endpoint.trim().is_empty() {
            return Err(CoreError::InvalidConfig("endpoint is empty".into()));
        }
        Ok(())
    }
}

/// Base name of the running program, or `"job"` when it cannot be determined.
fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "job".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_values() {
        let cfg = PushConfig::default();

        assert_eq!(cfg.endpoint, "http://localhost:9091");
        assert_eq!(cfg.instance, "");
        assert_eq!(cfg.success_interval, None);
        assert!(!cfg.job_name.is_empty());
        assert!(!cfg.job_name.contains('/'));
    }

    #[test]
    fn lookup_without_variables_gives_defaults() {
        let cfg = PushConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, PushConfig::default());
    }

    #[test]
    fn lookup_reads_all_variables() {
        let cfg = PushConfig::from_lookup(lookup(&[
            ("PUSHGATEWAY", "http://gateway:9091"),
            ("JOB_SUCCESS_INTERVAL", "86400"),
            ("JOB_NAMESPACE", "some-namespace"),
        ]))
        .unwrap();

        assert_eq!(cfg.endpoint, "http://gateway:9091");
        assert_eq!(cfg.success_interval, Some(86400));
        assert_eq!(cfg.instance, "some-namespace");
    }

    #[test]
    fn empty_variables_are_ignored() {
        let cfg = PushConfig::from_lookup(lookup(&[
            ("PUSHGATEWAY", ""),
            ("JOB_SUCCESS_INTERVAL", "  "),
        ]))
        .unwrap();

        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.success_interval, None);
    }

    #[test]
    fn malformed_interval_is_rejected() {
        for bad in ["soon", "-5", "1.5"] {
            let err = PushConfig::from_lookup(lookup(&[("JOB_SUCCESS_INTERVAL", bad)])).unwrap_err();
            assert!(
                matches!(err, CoreError::InvalidInterval { key: "JOB_SUCCESS_INTERVAL", .. }),
                "expected interval error for {bad:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn explicit_instance_overrides_environment() {
        let cfg = PushConfig::from_lookup(lookup(&[("JOB_NAMESPACE", "some-namespace")]))
            .unwrap()
            .with_instance("override-instance");

        assert_eq!(cfg.instance, "override-instance");
    }

    #[test]
    fn validate_rejects_unaddressable_groups() {
        let ok = PushConfig::default().with_job_name("nightly-import");
        assert!(ok.validate().is_ok());

        let bad = [
            ok.clone().with_job_name(""),
            ok.clone().with_job_name("a/b"),
            ok.clone().with_instance("ns/pod"),
            ok.clone().with_endpoint(" "),
        ];
        for cfg in bad {
            assert!(
                matches!(cfg.validate(), Err(CoreError::InvalidConfig(_))),
                "expected invalid config for {cfg:?}"
            );
        }
    }

    #[test]
    fn serde_uses_defaults_for_missing_fields() {
        let cfg: PushConfig = serde_json::from_str(r#"{"job_name": "import"}"#).unwrap();

        assert_eq!(cfg.job_name, "import");
        assert_eq!(cfg.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(cfg.instance, "");
        assert_eq!(cfg.success_interval, None);
    }

    #[test]
    fn serde_reads_success_interval() {
        let cfg: PushConfig =
            serde_json::from_str(r#"{"job_name": "import", "success_interval": 3600}"#).unwrap();
        assert_eq!(cfg.success_interval, Some(3600));
    }
}
