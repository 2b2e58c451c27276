use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;

use scriptcast::exec::ScriptExecutor;
use scriptcast::types::{ExecutionResult, RunOutcome};

/// A fake executor that:
/// - records each script it was asked to run
/// - either completes immediately, or holds every run until the test
///   releases it with [`allow_completion`](FakeExecutor::allow_completion).
///
/// Held runs still honour the cancellation token, so driver shutdown
/// behaviour can be exercised without real processes.
pub struct FakeExecutor {
    started: Arc<Mutex<Vec<String>>>,
    release: Arc<Notify>,
    hold: bool,
}

impl FakeExecutor {
    /// Executor that completes each run immediately.
    pub fn immediate() -> Self {
        Self {
            started: Arc::new(Mutex::new(Vec::new())),
            release: Arc::new(Notify::new()),
            hold: false,
        }
    }

    /// Executor that holds every run until `allow_completion` is called.
    pub fn held() -> Self {
        Self {
            hold: true,
            ..Self::immediate()
        }
    }

    /// Scripts passed to `run` so far, in call order.
    pub fn started(&self) -> Vec<String> {
        self.started.lock().unwrap().clone()
    }

    pub fn started_count(&self) -> usize {
        self.started.lock().unwrap().len()
    }

    /// Let one held run complete.
    pub fn allow_completion(&self) {
        self.release.notify_one();
    }
}

impl ScriptExecutor for FakeExecutor {
    fn run(
        &self,
        script: String,
        _interpreter: String,
        cancel: CancellationToken,
    ) -> Pin<Box<dyn Future<Output = RunOutcome> + Send + 'static>> {
        self.started.lock().unwrap().push(script);
        let release = Arc::clone(&self.release);
        let hold = self.hold;

        Box::pin(async move {
            if hold {
                tokio::select! {
                    _ = release.notified() => {}
                    _ = cancel.cancelled() => return RunOutcome::Cancelled,
                }
            }
            RunOutcome::Completed(ExecutionResult::ok("fake result"))
        })
    }
}
