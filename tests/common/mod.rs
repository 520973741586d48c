//! Shared utilities for integration and load testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use health_probe::config::ProbeConfig;
use health_probe::http::{AppState, HttpServer, ServerError};
use health_probe::lifecycle::Shutdown;
use health_probe::net::Listener;
use tokio::task::JoinHandle;

/// A probe server running on a real socket.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    handle: JoinHandle<Result<(), ServerError>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Trigger shutdown and wait for the server to return.
    pub async fn stop(self) -> Result<(), ServerError> {
        self.shutdown.trigger();
        tokio::time::timeout(Duration::from_secs(10), self.handle)
            .await
            .expect("server did not stop")
            .expect("server task panicked")
    }
}

/// Default configuration with no drain delay, so `stop` returns promptly.
pub fn config() -> ProbeConfig {
    ProbeConfig {
        drain_delay: Duration::ZERO,
        ..ProbeConfig::default()
    }
}

/// Start a server with the default state on an ephemeral loopback port.
pub async fn start_server(config: ProbeConfig) -> TestServer {
    start_server_with(config, AppState::from_config).await
}

/// Start a server on an ephemeral loopback port with a custom state.
pub async fn start_server_with<F>(config: ProbeConfig, make_state: F) -> TestServer
where
    F: FnOnce(&ProbeConfig, &Shutdown) -> AppState,
{
    let listener = Listener::bind("127.0.0.1:0".parse().unwrap(), config.max_connections)
        .await
        .unwrap();
    serve(config, listener, make_state)
}

/// Start a server on an already bound listener.
pub fn serve<F>(config: ProbeConfig, listener: Listener, make_state: F) -> TestServer
where
    F: FnOnce(&ProbeConfig, &Shutdown) -> AppState,
{
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let state = make_state(&config, &shutdown);
    let server = HttpServer::new(&config, state, shutdown.clone());

    let handle = tokio::spawn(server.run(listener));

    TestServer {
        addr: SocketAddr::from(([127, 0, 0, 1], addr.port())),
        shutdown,
        handle,
    }
}

/// HTTP client that never reuses or proxies connections.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
