//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the two probe routes
//! - Wire up middleware (request ID, tracing, write timeout)
//! - Serve each accepted connection over HTTP/1.1 with a header read timeout
//! - On shutdown, keep accepting for a short delay (readiness already
//!   reports 503), then stop accepting and drain open connections

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use hyper::server::conn::http1;
use hyper_util::rt::{TokioIo, TokioTimer};
use hyper_util::service::TowerToHyperService;
use tokio::net::TcpStream;
use tokio::time;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProbeConfig;
use crate::health::{DrainingGate, HealthReporter, ReadinessEvaluator};
use crate::http::handlers;
use crate::http::request::{make_request_span, UuidRequestId, X_REQUEST_ID};
use crate::lifecycle::Shutdown;
use crate::net::{ConnectionPermit, ConnectionTracker, Listener, ListenerError};

/// Pause after a failed accept (typically file descriptor exhaustion).
const ACCEPT_ERROR_BACKOFF: Duration = Duration::from_millis(100);

/// Server runtime error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Listener error: {0}")]
    Listener(#[from] ListenerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub reporter: Arc<HealthReporter>,
    pub readiness: Arc<ReadinessEvaluator>,
}

impl AppState {
    pub fn new(reporter: HealthReporter, readiness: ReadinessEvaluator) -> Self {
        Self {
            reporter: Arc::new(reporter),
            readiness: Arc::new(readiness),
        }
    }

    /// Default state: static probes, and readiness that closes on shutdown.
    pub fn from_config(config: &ProbeConfig, shutdown: &Shutdown) -> Self {
        Self::new(
            HealthReporter::with_default_probes(config.version.clone(), config.probe_timeout),
            ReadinessEvaluator::new().with_gate(DrainingGate::new(shutdown.clone())),
        )
    }
}

/// HTTP server for the probe endpoints.
pub struct HttpServer {
    router: Router,
    read_timeout: Duration,
    drain_delay: Duration,
    shutdown_grace: Duration,
    shutdown: Shutdown,
}

impl HttpServer {
    /// Create a new HTTP server. `config` is read here and never again.
    pub fn new(config: &ProbeConfig, state: AppState, shutdown: Shutdown) -> Self {
        Self {
            router: Self::build_router(config, state),
            read_timeout: config.read_timeout,
            drain_delay: config.drain_delay,
            shutdown_grace: config.shutdown_grace,
            shutdown,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(config: &ProbeConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/ready", get(handlers::ready))
            .with_state(state)
            .layer(TimeoutLayer::new(config.write_timeout))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
    }

    /// Accept connections until shutdown, keep accepting for `drain_delay`
    /// while readiness reports 503, then stop accepting and drain.
    pub async fn run(self, listener: Listener) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let tracker = ConnectionTracker::new();
        // Connections close on `drain`, which fires only once the listener is gone.
        let drain = Shutdown::new();
        let mut shutdown = self.shutdown.subscribe();

        tokio::select! {
            _ = self.accept_loop(&listener, &tracker, &drain) => {}
            _ = shutdown.recv() => {}
        }

        tracing::info!(
            delay_ms = self.drain_delay.as_millis() as u64,
            "Shutdown requested, reporting not ready before draining"
        );
        let _ = time::timeout(
            self.drain_delay,
            self.accept_loop(&listener, &tracker, &drain),
        )
        .await;

        // Stop accepting before draining.
        drop(listener);
        drain.trigger();
        tracing::info!(
            connections = tracker.active_count(),
            grace_secs = self.shutdown_grace.as_secs(),
            "Draining connections"
        );

        if time::timeout(self.shutdown_grace, tracker.wait_for_idle())
            .await
            .is_err()
        {
            tracing::warn!(
                connections = tracker.active_count(),
                "Shutdown grace period elapsed with connections still open"
            );
        }

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Accept and serve connections until the future is dropped.
    async fn accept_loop(
        &self,
        listener: &Listener,
        tracker: &ConnectionTracker,
        drain: &Shutdown,
    ) {
        loop {
            match listener.accept().await {
                Ok((stream, peer_addr, permit)) => {
                    self.spawn_connection(stream, peer_addr, permit, tracker, drain);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to accept connection");
                    time::sleep(ACCEPT_ERROR_BACKOFF).await;
                }
            }
        }
    }

    fn spawn_connection(
        &self,
        stream: TcpStream,
        peer_addr: SocketAddr,
        permit: ConnectionPermit,
        tracker: &ConnectionTracker,
        drain: &Shutdown,
    ) {
        let guard = tracker.track();
        let mut drain = drain.subscribe();
        let service = TowerToHyperService::new(self.router.clone());

        let connection = http1::Builder::new()
            .timer(TokioTimer::new())
            .header_read_timeout(self.read_timeout)
            .serve_connection(TokioIo::new(stream), service);

        tokio::spawn(async move {
            let _permit = permit;
            tokio::pin!(connection);

            let result = tokio::select! {
                result = connection.as_mut() => result,
                _ = drain.recv() => {
                    connection.as_mut().graceful_shutdown();
                    connection.await
                }
            };

            if let Err(e) = result {
                tracing::debug!(
                    connection_id = %guard.id(),
                    peer_addr = %peer_addr,
                    error = %e,
                    "Connection closed with error"
                );
            }
        });
    }
}
