//! Configuration loading from the process environment.
//!
//! Resolution never fails: a missing or empty variable takes its default, and
//! a malformed `PORT` is rejected with a warning and replaced by
//! [`DEFAULT_PORT`].

use crate::config::schema::{ProbeConfig, DEFAULT_ENVIRONMENT, DEFAULT_PORT};

/// Environment variable holding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Environment variable holding the deployment label.
pub const ENVIRONMENT_ENV: &str = "ENVIRONMENT";

/// Resolve configuration from the process environment.
pub fn resolve() -> ProbeConfig {
    resolve_with(|key| std::env::var(key).ok())
}

/// Resolve configuration using `lookup` in place of the process environment.
pub fn resolve_with<F>(lookup: F) -> ProbeConfig
where
    F: Fn(&str) -> Option<String>,
{
    let port = match non_empty(&lookup, PORT_ENV) {
        Some(raw) => parse_port(&raw),
        None => DEFAULT_PORT,
    };
    let environment =
        non_empty(&lookup, ENVIRONMENT_ENV).unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

    ProbeConfig {
        port,
        environment,
        ..ProbeConfig::default()
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_port(raw: &str) -> u16 {
    match raw.parse::<u16>() {
        Ok(port) => port,
        Err(e) => {
            tracing::warn!(
                value = %raw,
                error = %e,
                default = DEFAULT_PORT,
                "Ignoring invalid PORT, using default"
            );
            DEFAULT_PORT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn resolve_from(vars: &[(&str, &str)]) -> ProbeConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        resolve_with(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = resolve_from(&[]);
        assert_eq!(config, ProbeConfig::default());
    }

    #[test]
    fn valid_port_is_used() {
        for port in ["0", "1", "80", "8080", "9090", "65535"] {
            let config = resolve_from(&[("PORT", port)]);
            assert_eq!(config.port.to_string(), port);
        }
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let config = resolve_from(&[("PORT", " 9090 "), ("ENVIRONMENT", " staging\n")]);
        assert_eq!(config.port, 9090);
        assert_eq!(config.environment, "staging");
    }

    #[test]
    fn empty_port_falls_back_to_default() {
        assert_eq!(resolve_from(&[("PORT", "")]).port, DEFAULT_PORT);
        assert_eq!(resolve_from(&[("PORT", "   ")]).port, DEFAULT_PORT);
    }

    // Malformed input falls back to the documented default rather than zero.
    #[test]
    fn malformed_port_falls_back_to_default() {
        for raw in ["notanumber", "-1", "65536", "80.5", "0x1f90", "8080abc"] {
            let config = resolve_from(&[("PORT", raw)]);
            assert_eq!(config.port, DEFAULT_PORT, "PORT={raw:?}");
            assert_ne!(config.port, 0);
        }
    }

    #[test]
    fn environment_label_is_free_form() {
        let config = resolve_from(&[("ENVIRONMENT", "Production-EU")]);
        assert_eq!(config.environment, "Production-EU");

        let config = resolve_from(&[("ENVIRONMENT", "")]);
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn timeouts_are_not_overridable() {
        let config = resolve_from(&[("READ_TIMEOUT", "1"), ("WRITE_TIMEOUT", "1")]);
        assert_eq!(config.read_timeout, ProbeConfig::default().read_timeout);
        assert_eq!(config.write_timeout, ProbeConfig::default().write_timeout);
    }
}
