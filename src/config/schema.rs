//! Configuration schema definitions.
//!
//! `ProbeConfig` is the single configuration value for the service. It is
//! built once at startup by the loader and handed to the HTTP server, which
//! copies what it needs out of it before accepting traffic.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Port used when `PORT` is absent, empty or malformed.
pub const DEFAULT_PORT: u16 = 8080;

/// Read and write timeout applied to every connection.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Environment label used when `ENVIRONMENT` is absent or empty.
pub const DEFAULT_ENVIRONMENT: &str = "development";

/// Build identifier reported by `/health`.
pub const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound on a single health probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// How long the server keeps accepting, while reporting not ready, after a
/// shutdown signal and before it starts draining.
pub const DEFAULT_DRAIN_DELAY: Duration = Duration::from_secs(5);

/// How long open connections may drain after a shutdown signal.
pub const DEFAULT_SHUTDOWN_GRACE: Duration = Duration::from_secs(30);

/// Maximum concurrent connections (backpressure).
pub const DEFAULT_MAX_CONNECTIONS: usize = 10_000;

/// Root configuration for the probe server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeConfig {
    /// TCP port to listen on, on all interfaces.
    pub port: u16,

    /// Maximum time to receive a complete request head.
    pub read_timeout: Duration,

    /// Maximum time from the start of request handling to the response.
    pub write_timeout: Duration,

    /// Free-form deployment label (e.g. "production"). Informational only.
    pub environment: String,

    /// Release identifier reported in health responses.
    pub version: String,

    /// Bound applied to each registered health probe.
    pub probe_timeout: Duration,

    /// Time between the shutdown signal and closing the listener, during
    /// which `/ready` answers 503 so the orchestrator can stop routing.
    pub drain_delay: Duration,

    /// Drain deadline for open connections on shutdown.
    pub shutdown_grace: Duration,

    /// Maximum concurrent connections accepted by the listener.
    pub max_connections: usize,
}

impl ProbeConfig {
    /// Address the listener binds to (`0.0.0.0:<port>`).
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            read_timeout: DEFAULT_TIMEOUT,
            write_timeout: DEFAULT_TIMEOUT,
            environment: DEFAULT_ENVIRONMENT.to_string(),
            version: DEFAULT_VERSION.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            drain_delay: DEFAULT_DRAIN_DELAY,
            shutdown_grace: DEFAULT_SHUTDOWN_GRACE,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}
