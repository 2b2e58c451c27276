// src/exec/gate.rs

//! Per-consumer execution admission.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Admits at most one execution at a time.
///
/// A trigger that arrives while an execution is in flight is dropped, not
/// queued: skipping a refresh beats piling up a backlog. The permit is
/// released when the guard drops, so the gate reopens on every exit path,
/// panics included.
#[derive(Debug, Clone)]
pub struct ExecutionGate {
    permits: Arc<Semaphore>,
}

/// Guard for an admitted execution. Dropping it reopens the gate.
#[derive(Debug)]
pub struct ExecutionPermit {
    _permit: OwnedSemaphorePermit,
}

impl ExecutionGate {
    pub fn new() -> Self {
        Self {
            permits: Arc::new(Semaphore::new(1)),
        }
    }

    /// Try to admit an execution without waiting.
    pub fn try_acquire(&self) -> Option<ExecutionPermit> {
        self.permits
            .clone()
            .try_acquire_owned()
            .ok()
            .map(|permit| ExecutionPermit { _permit: permit })
    }
}

impl Default for ExecutionGate {
    fn default() -> Self {
        Self::new()
    }
}
