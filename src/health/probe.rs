//! Named health probes.
//!
//! A probe reports the status of one dependency. The reporter runs every
//! registered probe on each `/health` request and records the outcome under
//! the probe's name. Wiring in a real dependency check means implementing
//! [`Probe`] and registering it; the response shape does not change.

use std::time::Duration;

use async_trait::async_trait;

/// Failure reported by a probe.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    /// The probe did not complete within its time bound.
    #[error("timeout after {0:?}")]
    TimedOut(Duration),

    /// The dependency answered, or failed to, in a way that counts as down.
    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// A named check contributing one entry to the health report.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Key under which the outcome is reported.
    fn name(&self) -> &str;

    /// Run the check.
    async fn check(&self) -> Result<(), ProbeError>;
}

/// Probe that always succeeds.
///
/// Stands in for a dependency that has no live check wired in yet.
#[derive(Debug, Clone)]
pub struct StaticProbe {
    name: String,
}

impl StaticProbe {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Probe for StaticProbe {
    fn name(&self) -> &str {
        &self.name
    }

    async fn check(&self) -> Result<(), ProbeError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_probe_always_ok() {
        let probe = StaticProbe::new("database");
        assert_eq!(probe.name(), "database");
        assert_eq!(probe.check().await, Ok(()));
    }

    #[test]
    fn error_text_is_the_reported_status() {
        assert_eq!(
            ProbeError::TimedOut(Duration::from_millis(250)).to_string(),
            "timeout after 250ms"
        );
        assert_eq!(
            ProbeError::Unavailable("connection refused".into()).to_string(),
            "unavailable: connection refused"
        );
    }
}
