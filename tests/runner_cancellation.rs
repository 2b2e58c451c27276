#![cfg(unix)]

mod common;

use common::{init_tracing, isolate_workspace, wait_for_workspace_clean, write_helper_script};

use std::time::{Duration, Instant};

use tokio_util::sync::CancellationToken;

use scriptcast::exec::run_script;
use scriptcast::types::RunOutcome;

const SCRIPT: &str = "def main():\n    return 'never observed'\n";

#[tokio::test]
async fn cancellation_kills_the_child_and_reports_no_result() {
    init_tracing();
    let workspace = isolate_workspace();

    let dir = tempfile::tempdir().expect("tempdir");
    let slow = write_helper_script(dir.path(), "slow.sh", "#!/bin/sh\nsleep 5\n");

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(100)).await;
            cancel.cancel();
        });
    }

    let started = Instant::now();
    let outcome = run_script(SCRIPT, slow.to_str().expect("utf-8 path"), cancel).await;

    assert_eq!(outcome, RunOutcome::Cancelled);
    assert!(
        started.elapsed() < Duration::from_secs(4),
        "cancellation did not terminate the wait"
    );

    // Workspace state stays intact: the harness file is still cleaned up.
    wait_for_workspace_clean(&workspace).await;
}

#[tokio::test]
async fn already_cancelled_token_short_circuits() {
    init_tracing();
    let workspace = isolate_workspace();

    let cancel = CancellationToken::new();
    cancel.cancel();

    let outcome = run_script(SCRIPT, "true", cancel).await;
    assert_eq!(outcome, RunOutcome::Cancelled);

    wait_for_workspace_clean(&workspace).await;
}
