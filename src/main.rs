//! Liveness and Readiness Probe Server
//!
//! A small HTTP service answering orchestrator probes.
//!
//! # Architecture Overview
//!
//! ```text
//!     Orchestrator probe            ┌──────────────────────────────────────────┐
//!     ──────────────────────────────┼─▶ net::Listener ─▶ http::HttpServer      │
//!                                   │                      │                   │
//!                                   │          ┌───────────┴───────────┐       │
//!                                   │          ▼                       ▼       │
//!                                   │   GET /health              GET /ready    │
//!                                   │   HealthReporter       ReadinessEvaluator│
//!                                   │   (probes, JSON)       (gates, 200/503)  │
//!                                   │                                          │
//!                                   │   config (env) · lifecycle · logging     │
//!                                   └──────────────────────────────────────────┘
//! ```
//!
//! # Startup
//! - Initialize logging
//! - Resolve configuration from the environment (never fails)
//! - Bind the listener; failure here is the only fatal error (exit 1)
//! - Serve until SIGINT/SIGTERM, then drain and exit 0

use health_probe::config;
use health_probe::http::{AppState, HttpServer};
use health_probe::lifecycle::{signals, Shutdown};
use health_probe::net::Listener;
use health_probe::observability::{self, LogFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::init_logging(LogFormat::from_env());

    let config = config::resolve();

    tracing::info!(
        port = config.port,
        environment = %config.environment,
        version = %config.version,
        read_timeout_secs = config.read_timeout.as_secs(),
        write_timeout_secs = config.write_timeout.as_secs(),
        "Starting server on port {}",
        config.port
    );

    let listener = match Listener::bind(config.bind_addr(), config.max_connections).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Server failed to start");
            std::process::exit(1);
        }
    };

    let shutdown = Shutdown::new();
    signals::spawn_handler(shutdown.clone());

    let state = AppState::from_config(&config, &shutdown);
    let server = HttpServer::new(&config, state, shutdown);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
