//! Liveness payload served by `/health`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Check value reported for a probe that succeeded.
pub const CHECK_OK: &str = "ok";

/// Overall liveness status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

/// Health report, built fresh for every request.
///
/// `checks` is keyed by probe name; consumers must not assume a closed key set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub checks: BTreeMap<String, String>,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn serializes_to_wire_shape() {
        let report = HealthReport {
            status: HealthStatus::Healthy,
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
            version: "1.2.3".to_string(),
            checks: [("redis", "ok"), ("database", "ok"), ("storage", "ok")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        };

        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value,
            json!({
                "status": "healthy",
                "timestamp": "2024-05-01T12:30:00Z",
                "version": "1.2.3",
                "checks": { "database": "ok", "redis": "ok", "storage": "ok" }
            })
        );
    }

    #[test]
    fn unhealthy_status_is_lowercase() {
        assert_eq!(
            serde_json::to_string(&HealthStatus::Unhealthy).unwrap(),
            "\"unhealthy\""
        );
    }
}
