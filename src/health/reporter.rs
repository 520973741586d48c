//! Status reporter behind `/health`.
//!
//! # Responsibilities
//! - Hold the probe registry
//! - Run all probes concurrently, each with its own time bound
//! - Merge outcomes into a fresh [`HealthReport`]

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures_util::future::join_all;
use tokio::time;

use crate::health::probe::{Probe, ProbeError, StaticProbe};
use crate::health::report::{HealthReport, HealthStatus, CHECK_OK};

/// Probe names registered by [`HealthReporter::with_default_probes`].
pub const DEFAULT_PROBES: [&str; 3] = ["database", "redis", "storage"];

pub struct HealthReporter {
    version: String,
    probe_timeout: Duration,
    probes: Vec<Arc<dyn Probe>>,
}

impl HealthReporter {
    /// Reporter with an empty registry.
    pub fn new(version: impl Into<String>, probe_timeout: Duration) -> Self {
        Self {
            version: version.into(),
            probe_timeout,
            probes: Vec::new(),
        }
    }

    /// Reporter with a static probe for each of [`DEFAULT_PROBES`].
    pub fn with_default_probes(version: impl Into<String>, probe_timeout: Duration) -> Self {
        DEFAULT_PROBES
            .iter()
            .fold(Self::new(version, probe_timeout), |reporter, name| {
                reporter.with_probe(StaticProbe::new(*name))
            })
    }

    /// Register a probe, replacing any existing probe with the same name.
    pub fn with_probe(mut self, probe: impl Probe + 'static) -> Self {
        self.probes.retain(|existing| existing.name() != probe.name());
        self.probes.push(Arc::new(probe));
        self
    }

    pub fn probe_names(&self) -> impl Iterator<Item = &str> {
        self.probes.iter().map(|probe| probe.name())
    }

    /// Run every probe and assemble the report.
    pub async fn report(&self) -> HealthReport {
        let outcomes = join_all(self.probes.iter().map(|probe| self.run_probe(probe.as_ref()))).await;

        let mut status = HealthStatus::Healthy;
        let mut checks = BTreeMap::new();
        for (name, outcome) in outcomes {
            let value = match outcome {
                Ok(()) => CHECK_OK.to_string(),
                Err(e) => {
                    tracing::warn!(probe = %name, error = %e, "Health probe failed");
                    status = HealthStatus::Unhealthy;
                    e.to_string()
                }
            };
            checks.insert(name, value);
        }

        HealthReport {
            status,
            timestamp: Utc::now(),
            version: self.version.clone(),
            checks,
        }
    }

    async fn run_probe(&self, probe: &dyn Probe) -> (String, Result<(), ProbeError>) {
        let outcome = match time::timeout(self.probe_timeout, probe.check()).await {
            Ok(result) => result,
            Err(_) => Err(ProbeError::TimedOut(self.probe_timeout)),
        };
        (probe.name().to_string(), outcome)
    }
}

impl std::fmt::Debug for HealthReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthReporter")
            .field("version", &self.version)
            .field("probe_timeout", &self.probe_timeout)
            .field("probes", &self.probe_names().collect::<Vec<_>>())
            .finish()
    }
}
