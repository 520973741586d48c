//! Probe endpoint handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::health::HealthReport;
use crate::http::server::AppState;

/// Body returned by `/ready` when the service can take traffic.
pub const READY_BODY: &str = "ready";

/// Liveness probe. Always 200; probe failures are reported in the body.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.reporter.report().await)
}

/// Readiness probe. 200 with `ready`, or 503 with an empty body.
pub async fn ready(State(state): State<AppState>) -> Response {
    if state.readiness.is_ready() {
        (StatusCode::OK, READY_BODY).into_response()
    } else {
        StatusCode::SERVICE_UNAVAILABLE.into_response()
    }
}
