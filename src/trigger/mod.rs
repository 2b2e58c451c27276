// src/trigger/mod.rs

//! Change-driven execution triggering.
//!
//! - [`state`] is the pure refresh state machine: which events cause an
//!   execution attempt and how the ticker is (re)configured.
//! - [`driver`] is the async shell: channels, timers, the execution gate,
//!   and result broadcast.
//! - [`save`] debounces settings edits into persistence saves.
//!
//! The pure-core/IO-shell split keeps the semantics testable without
//! processes or timers.

pub mod driver;
pub mod save;
pub mod state;

pub use driver::spawn_refresh_driver;
pub use save::{SAVE_DEBOUNCE, spawn_save_scheduler};
pub use state::{RefreshState, ScheduleView, TriggerCommand, TriggerEvent, TriggerStateMachine};

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::config::SharedSettings;
use crate::exec::ScriptExecutor;
use crate::registry::ResultRegistry;
use crate::types::{ExecutionResult, RunOutcome};

/// One-shot "run now" entry point for the settings surface.
///
/// Not gated: the button works even while a display surface has its own
/// execution in flight. The completed result is broadcast to every
/// registered consumer and returned for the status line; a cancelled run
/// returns `None` and delivers nothing.
pub async fn run_now(
    settings: &Arc<SharedSettings>,
    registry: &ResultRegistry,
    executor: &dyn ScriptExecutor,
    cancel: CancellationToken,
) -> Option<ExecutionResult> {
    let snapshot = settings.snapshot();
    match executor
        .run(snapshot.script, snapshot.interpreter, cancel)
        .await
    {
        RunOutcome::Completed(result) => {
            registry.broadcast(settings, &result);
            Some(result)
        }
        RunOutcome::Cancelled => None,
    }
}
