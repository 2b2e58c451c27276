// src/exec/runner.rs

//! Single script execution: harness materialization, process lifecycle,
//! concurrent stream capture, outcome classification.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::errors::Result;
use crate::exec::encoding::{STREAM_ENCODING_NAME, decode_stream};
use crate::exec::harness::build_harness;
use crate::exec::workspace::{HARNESS_PREFIX, workspace_dir};
use crate::types::{ExecutionResult, RunOutcome};

/// Failure message when the script text is blank.
pub const MSG_EMPTY_SCRIPT: &str = "script is empty";
/// Failure message when the interpreter process cannot be started.
pub const MSG_CANNOT_START: &str = "cannot start interpreter";
/// Failure message when the script exited non-zero.
pub const MSG_SCRIPT_FAILED: &str = "script execution failed";
/// Failure message when the runner itself hit an unexpected fault.
pub const MSG_INTERNAL_ERROR: &str = "unexpected error while running script";
/// Success message shown when stdout trimmed to empty.
pub const MSG_NO_OUTPUT: &str = "(main() returned nothing)";

/// Run `script` through `interpreter` and classify the outcome.
///
/// This is the single fault boundary of the execution core: every error
/// below it is folded into a failure [`ExecutionResult`] instead of
/// propagating. Cancellation through `cancel` kills the child and yields
/// [`RunOutcome::Cancelled`]; no result is delivered in that case.
///
/// A blank script fails immediately without touching the filesystem or
/// starting a process.
pub async fn run_script(script: &str, interpreter: &str, cancel: CancellationToken) -> RunOutcome {
    if script.trim().is_empty() {
        return RunOutcome::Completed(ExecutionResult::failed(
            MSG_EMPTY_SCRIPT,
            "write a script that defines a main() function",
        ));
    }

    let harness_path =
        workspace_dir().join(format!("{HARNESS_PREFIX}{}.py", Uuid::new_v4().simple()));

    let outcome = execute(script, interpreter, &harness_path, cancel).await;

    // Best-effort cleanup; never influences the returned outcome.
    if let Err(err) = tokio::fs::remove_file(&harness_path).await {
        if err.kind() != std::io::ErrorKind::NotFound {
            debug!(path = ?harness_path, error = %err, "failed to remove harness file");
        }
    }

    match outcome {
        Ok(outcome) => outcome,
        Err(err) => {
            RunOutcome::Completed(ExecutionResult::failed(MSG_INTERNAL_ERROR, err.to_string()))
        }
    }
}

async fn execute(
    script: &str,
    interpreter: &str,
    harness_path: &Path,
    cancel: CancellationToken,
) -> Result<RunOutcome> {
    if cancel.is_cancelled() {
        return Ok(RunOutcome::Cancelled);
    }

    tokio::fs::create_dir_all(workspace_dir()).await?;

    let program = build_harness(script);
    tokio::select! {
        written = tokio::fs::write(harness_path, program.as_bytes()) => written?,
        _ = cancel.cancelled() => return Ok(RunOutcome::Cancelled),
    }

    debug!(interpreter, path = ?harness_path, "launching interpreter");

    let mut cmd = Command::new(interpreter);
    cmd.arg(harness_path)
        .current_dir(workspace_dir())
        .env("PYTHONIOENCODING", STREAM_ENCODING_NAME)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(windows)]
    {
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    let mut child = match cmd.spawn() {
        Ok(child) => child,
        Err(err) => {
            info!(interpreter, error = %err, "interpreter could not be started");
            return Ok(RunOutcome::Completed(ExecutionResult::failed(
                MSG_CANNOT_START,
                err.to_string(),
            )));
        }
    };

    // Drain both pipes concurrently with the wait; a pipe left unread can
    // fill up and deadlock the child.
    let stdout_task = drain(child.stdout.take());
    let stderr_task = drain(child.stderr.take());

    let status = tokio::select! {
        status = child.wait() => status?,
        _ = cancel.cancelled() => {
            info!(interpreter, "execution cancelled; killing child process");
            if let Err(err) = child.kill().await {
                warn!(error = %err, "failed to kill child process on cancellation");
            }
            return Ok(RunOutcome::Cancelled);
        }
    };

    let stdout = decode_stream(&stdout_task.await.unwrap_or_default());
    let stderr = decode_stream(&stderr_task.await.unwrap_or_default());

    Ok(RunOutcome::Completed(classify(status, &stdout, &stderr)))
}

/// Read a child pipe to completion on its own task, so both streams make
/// progress while the exit is awaited.
fn drain<R>(pipe: Option<R>) -> tokio::task::JoinHandle<Vec<u8>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    })
}

/// Map an exit status plus captured streams onto an [`ExecutionResult`].
pub fn classify(status: ExitStatus, stdout: &str, stderr: &str) -> ExecutionResult {
    let stdout = stdout.trim_end_matches(['\r', '\n']);
    let stderr = stderr.trim();

    if status.success() {
        let message = if stdout.is_empty() { MSG_NO_OUTPUT } else { stdout };
        return ExecutionResult::ok(message);
    }

    let details = if stderr.is_empty() {
        match status.code() {
            Some(code) => format!("interpreter exit code {code}"),
            None => "interpreter terminated by signal".to_string(),
        }
    } else {
        stderr.to_string()
    };
    ExecutionResult::failed(MSG_SCRIPT_FAILED, details)
}
