// src/types.rs

/// Classified outcome of one script execution, as consumed by display
/// surfaces.
///
/// Immutable once constructed. On success `message` carries the script's
/// returned value and `details` is empty; on failure `message` is a short
/// human-readable category and `details` carries the diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub success: bool,
    pub message: String,
    pub details: String,
}

impl ExecutionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            details: String::new(),
        }
    }

    pub fn failed(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            details: details.into(),
        }
    }

    /// Text for the primary display surface.
    ///
    /// Failures render a fixed placeholder; raw diagnostics stay off the
    /// primary surface and are only reachable through
    /// [`status_line`](ExecutionResult::status_line).
    pub fn display_text(&self) -> &str {
        if self.success { &self.message } else { "Error" }
    }

    /// Full status text for the explicit "run now" surface.
    pub fn status_line(&self) -> String {
        if self.success {
            format!("succeeded: {}", self.message)
        } else if self.details.is_empty() {
            self.message.clone()
        } else {
            format!("{}: {}", self.message, self.details)
        }
    }
}

/// What a single call to the process runner produced.
///
/// Cancellation is a distinct outcome, not a failure result: a cancelled
/// run delivers nothing to consumers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed(ExecutionResult),
    Cancelled,
}

impl RunOutcome {
    /// The result, unless the run was cancelled.
    pub fn completed(self) -> Option<ExecutionResult> {
        match self {
            RunOutcome::Completed(result) => Some(result),
            RunOutcome::Cancelled => None,
        }
    }
}
