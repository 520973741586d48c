//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     Trigger → readiness flips to 503 → accepting continues for `drain_delay`
//!     → accept loop stops → open connections drain → server returns
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger
//! ```
//!
//! # Design Decisions
//! - Shutdown state is level-triggered (watch channel), so late subscribers see it
//! - Drain has a deadline: the server returns after `shutdown_grace` regardless

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownSignal};
