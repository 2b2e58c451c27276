// src/trigger/driver.rs

//! Async shell around the refresh state machine.
//!
//! One driver runs per display surface. It subscribes to settings changes,
//! owns the periodic ticker, admits executions through the per-consumer
//! gate, and broadcasts completed results to every surface registered for
//! the same settings scope. The driver holds no reference to its own
//! consumer; results reach it through the registry like everyone else.

use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::SharedSettings;
use crate::exec::{ExecutionGate, ScriptExecutor};
use crate::registry::ResultRegistry;
use crate::trigger::state::{ScheduleView, TriggerCommand, TriggerEvent, TriggerStateMachine};
use crate::types::RunOutcome;

/// Spawn the refresh driver for one display surface.
///
/// An initial execution is attempted immediately, then the loop reacts to
/// settings changes and ticks until `shutdown` is cancelled. Cancelling
/// `shutdown` also cancels any run still in flight.
pub fn spawn_refresh_driver(
    settings: Arc<SharedSettings>,
    registry: Arc<ResultRegistry>,
    executor: Arc<dyn ScriptExecutor>,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(refresh_loop(settings, registry, executor, shutdown))
}

async fn refresh_loop(
    settings: Arc<SharedSettings>,
    registry: Arc<ResultRegistry>,
    executor: Arc<dyn ScriptExecutor>,
    shutdown: CancellationToken,
) {
    let gate = ExecutionGate::new();
    let mut changes = settings.subscribe();
    let mut machine = TriggerStateMachine::new();
    let mut ticker: Option<Interval> = None;

    // Apply the stored schedule, then run once at startup.
    let startup = machine.apply_schedule(schedule_view(&settings));
    execute_commands(
        startup, &mut ticker, &settings, &registry, &executor, &gate, &shutdown,
    );
    run_attempt(&settings, &registry, &executor, &gate, &shutdown);

    loop {
        let commands = tokio::select! {
            _ = shutdown.cancelled() => break,

            change = changes.recv() => match change {
                Ok(change) => {
                    debug!(?change, "settings changed");
                    machine.step(TriggerEvent::Changed(change), schedule_view(&settings))
                }
                Err(RecvError::Lagged(skipped)) => {
                    // Missed notifications collapse into one fresh look at
                    // the settings.
                    warn!(skipped, "settings change stream lagged");
                    let mut commands = machine.apply_schedule(schedule_view(&settings));
                    commands.push(TriggerCommand::RunScript);
                    commands
                }
                Err(RecvError::Closed) => break,
            },

            _ = next_tick(ticker.as_mut()) => {
                machine.step(TriggerEvent::Tick, schedule_view(&settings))
            }
        };

        execute_commands(
            commands, &mut ticker, &settings, &registry, &executor, &gate, &shutdown,
        );
    }

    debug!("refresh driver stopped");
}

fn schedule_view(settings: &SharedSettings) -> ScheduleView {
    ScheduleView::from(&settings.snapshot())
}

/// Wait for the next periodic tick, or forever when no ticker is armed.
async fn next_tick(ticker: Option<&mut Interval>) {
    match ticker {
        Some(ticker) => {
            ticker.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn execute_commands(
    commands: Vec<TriggerCommand>,
    ticker: &mut Option<Interval>,
    settings: &Arc<SharedSettings>,
    registry: &Arc<ResultRegistry>,
    executor: &Arc<dyn ScriptExecutor>,
    gate: &ExecutionGate,
    shutdown: &CancellationToken,
) {
    for command in commands {
        match command {
            TriggerCommand::RestartTicker(period) => {
                let mut fresh = interval(period);
                fresh.set_missed_tick_behavior(MissedTickBehavior::Skip);
                // `interval` fires immediately; push the first tick one
                // full period out so the ticker counts from now.
                fresh.reset();
                *ticker = Some(fresh);
            }
            TriggerCommand::StopTicker => *ticker = None,
            TriggerCommand::RunScript => {
                run_attempt(settings, registry, executor, gate, shutdown);
            }
        }
    }
}

/// Start one execution if the gate admits it.
///
/// A trigger that arrives while a run is outstanding is dropped here, not
/// queued. The completed result is broadcast to every live consumer of the
/// settings scope; a cancelled run delivers nothing.
fn run_attempt(
    settings: &Arc<SharedSettings>,
    registry: &Arc<ResultRegistry>,
    executor: &Arc<dyn ScriptExecutor>,
    gate: &ExecutionGate,
    shutdown: &CancellationToken,
) {
    let Some(permit) = gate.try_acquire() else {
        debug!("execution already in flight; dropping trigger");
        return;
    };

    let snapshot = settings.snapshot();
    let run = executor.run(snapshot.script, snapshot.interpreter, shutdown.child_token());
    let settings = Arc::clone(settings);
    let registry = Arc::clone(registry);

    tokio::spawn(async move {
        match run.await {
            RunOutcome::Completed(result) => registry.broadcast(&settings, &result),
            RunOutcome::Cancelled => debug!("execution cancelled; no result delivered"),
        }
        drop(permit);
    });
}
