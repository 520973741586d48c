//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! Liveness (/health):
//!     reporter.rs
//!     → run every registered probe.rs concurrently, each with a timeout
//!     → merge outcomes into report.rs HealthReport
//!
//! Readiness (/ready):
//!     readiness.rs
//!     → consult every gate synchronously
//!     → ready only if all gates are open
//! ```
//!
//! # Design Decisions
//! - Reports are computed per request and never cached
//! - Probe failures change the report body, never the HTTP status
//! - Readiness is the place to signal "take me out of rotation" (503)

pub mod probe;
pub mod readiness;
pub mod report;
pub mod reporter;

pub use probe::{Probe, ProbeError, StaticProbe};
pub use readiness::{DrainingGate, ReadinessEvaluator, ReadinessFlag, ReadinessGate};
pub use report::{HealthReport, HealthStatus, CHECK_OK};
pub use reporter::{HealthReporter, DEFAULT_PROBES};
