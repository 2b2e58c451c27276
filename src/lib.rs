// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod registry;
pub mod trigger;
pub mod types;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::{ScriptSettings, SharedSettings};
use crate::exec::ProcessExecutor;
use crate::registry::{ResultConsumer, ResultRegistry};
use crate::types::{ExecutionResult, RunOutcome};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings loading (TOML file plus CLI overrides)
/// - the stale-workspace sweep
/// - either a single execution, or the refresh driver with Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let mut settings = match &args.config {
        Some(path) => config::load_from_path(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => ScriptSettings::default(),
    };

    if let Some(path) = &args.script_file {
        settings.script = std::fs::read_to_string(path)
            .with_context(|| format!("reading script file {}", path.display()))?;
    }
    if let Some(interpreter) = &args.interpreter {
        settings.interpreter = interpreter.clone();
    }
    settings.normalize();

    // Anything left over from an abnormal termination is stale.
    exec::workspace::purge_stale_scripts();

    let watch = args.watch || settings.auto_refresh_enabled;
    let settings = SharedSettings::new(settings);

    if watch {
        return watch_loop(settings).await;
    }

    let snapshot = settings.snapshot();
    match exec::run_script(
        &snapshot.script,
        &snapshot.interpreter,
        CancellationToken::new(),
    )
    .await
    {
        RunOutcome::Completed(result) if result.success => {
            println!("{}", result.message);
            Ok(())
        }
        RunOutcome::Completed(result) => anyhow::bail!("{}", result.status_line()),
        RunOutcome::Cancelled => Ok(()),
    }
}

/// Keep refreshing until Ctrl-C, printing each result as it arrives.
async fn watch_loop(settings: Arc<SharedSettings>) -> Result<()> {
    let registry = Arc::new(ResultRegistry::new());
    let surface: Arc<dyn ResultConsumer> = Arc::new(StdoutSurface);
    registry.register(&settings, Arc::downgrade(&surface));

    let shutdown = CancellationToken::new();
    let driver = trigger::spawn_refresh_driver(
        Arc::clone(&settings),
        Arc::clone(&registry),
        Arc::new(ProcessExecutor),
        shutdown.clone(),
    );

    // Ctrl-C → graceful shutdown.
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            shutdown.cancel();
        });
    }

    info!("refreshing until Ctrl-C");
    driver
        .await
        .map_err(|e| anyhow::anyhow!("refresh driver panicked: {e}"))?;

    drop(surface);
    Ok(())
}

/// Minimal display surface for the watch mode: the primary text goes to
/// stdout, like a widget would render it.
struct StdoutSurface;

impl ResultConsumer for StdoutSurface {
    fn apply_result(&self, result: &ExecutionResult) {
        println!("{}", result.display_text());
    }
}
