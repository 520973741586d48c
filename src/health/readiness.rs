//! Readiness evaluator behind `/ready`.
//!
//! The evaluator is the decision point; the decision logic lives in gates.
//! With no gates registered the service is always ready.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::lifecycle::Shutdown;

/// A synchronous condition that must hold for the service to take traffic.
///
/// Gates are consulted on every `/ready` request and must not block.
pub trait ReadinessGate: Send + Sync {
    fn name(&self) -> &str;

    fn is_open(&self) -> bool;
}

#[derive(Default)]
pub struct ReadinessEvaluator {
    gates: Vec<Box<dyn ReadinessGate>>,
}

impl ReadinessEvaluator {
    /// Evaluator with no gates: always ready.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_gate(mut self, gate: impl ReadinessGate + 'static) -> Self {
        self.gates.push(Box::new(gate));
        self
    }

    /// Ready when every gate is open.
    pub fn is_ready(&self) -> bool {
        match self.gates.iter().find(|gate| !gate.is_open()) {
            Some(gate) => {
                tracing::debug!(gate = gate.name(), "Readiness gate closed");
                false
            }
            None => true,
        }
    }
}

impl std::fmt::Debug for ReadinessEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.gates.iter().map(|gate| gate.name()).collect();
        f.debug_struct("ReadinessEvaluator")
            .field("gates", &names)
            .finish()
    }
}

/// Manually controlled gate, e.g. held closed until warm-up completes.
///
/// Clones share state, so one handle can sit in the evaluator while another
/// is flipped by application code.
#[derive(Debug, Clone)]
pub struct ReadinessFlag {
    name: String,
    ready: Arc<AtomicBool>,
}

impl ReadinessFlag {
    pub fn new(name: impl Into<String>, ready: bool) -> Self {
        Self {
            name: name.into(),
            ready: Arc::new(AtomicBool::new(ready)),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }
}

impl ReadinessGate for ReadinessFlag {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_open(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }
}

/// Gate that closes once shutdown has been triggered, so the orchestrator
/// stops routing traffic while connections drain.
#[derive(Debug, Clone)]
pub struct DrainingGate {
    shutdown: Shutdown,
}

impl DrainingGate {
    pub fn new(shutdown: Shutdown) -> Self {
        Self { shutdown }
    }
}

impl ReadinessGate for DrainingGate {
    fn name(&self) -> &str {
        "shutdown"
    }

    fn is_open(&self) -> bool {
        !self.shutdown.is_triggered()
    }
}
