//! Liveness and Readiness Probe Server Library

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::ProbeConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
