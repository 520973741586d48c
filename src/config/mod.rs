//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (PORT, ENVIRONMENT)
//!     → loader.rs (lookup, parse with fallback)
//!     → ProbeConfig (immutable)
//!     → consumed once by HttpServer at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once resolved; it is never re-read at request time
//! - Resolution is infallible; bad input degrades to documented defaults
//! - The environment lookup is injectable so tests never touch `std::env`

pub mod loader;
pub mod schema;

pub use loader::{resolve, resolve_with};
pub use schema::ProbeConfig;
