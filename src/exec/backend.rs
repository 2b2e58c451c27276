// src/exec/backend.rs

//! Pluggable script executor abstraction.
//!
//! The refresh driver and the run-now path talk to a `ScriptExecutor`
//! instead of calling [`run_script`] directly. This makes it easy to swap
//! in a fake executor in tests (with controllable completion) while keeping
//! the production process runner in [`runner`](crate::exec::runner).

use std::future::Future;
use std::pin::Pin;

use tokio_util::sync::CancellationToken;

use crate::exec::runner::run_script;
use crate::types::RunOutcome;

/// Trait abstracting how a single script execution is performed.
///
/// Production code uses [`ProcessExecutor`]; tests can provide their own
/// implementation that doesn't spawn real processes.
pub trait ScriptExecutor: Send + Sync {
    fn run(
        &self,
        script: String,
        interpreter: String,
        cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = RunOutcome> + Send + 'static>>;
}

/// Production executor backed by a real interpreter process.
#[derive(Debug, Default)]
pub struct ProcessExecutor;

impl ScriptExecutor for ProcessExecutor {
    fn run(
        &self,
        script: String,
        interpreter: String,
        cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = RunOutcome> + Send + 'static>> {
        Box::pin(async move { run_script(&script, &interpreter, cancel).await })
    }
}
