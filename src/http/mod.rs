//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (hyper HTTP/1.1 connection, header read timeout)
//!     → request.rs (request ID, tracing span)
//!     → write timeout
//!     → handlers.rs (/health → HealthReporter, /ready → ReadinessEvaluator)
//!     → Send to client
//! ```

pub mod handlers;
pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::{AppState, HttpServer, ServerError};
