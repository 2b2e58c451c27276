// src/config/model.rs

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default interpreter binary name, resolved through PATH.
pub const DEFAULT_INTERPRETER: &str = "python";

/// Default refresh period when auto refresh is enabled.
pub const DEFAULT_REFRESH_INTERVAL_SECONDS: i64 = 5;

/// Minimal valid script: defines `main()` and returns a string.
pub const DEFAULT_SCRIPT: &str = "def main():\n    return \"hello world!\"\n";

/// User-configurable options for one script display surface.
///
/// Deserialization applies per-field defaults, so a partial TOML file is
/// valid. Callers that accept external text must run [`normalize`] before
/// handing the settings to the runner: blank script/interpreter text and
/// non-positive intervals are replaced with the defaults, never stored.
///
/// [`normalize`]: ScriptSettings::normalize
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    pub interpreter: String,
    pub script: String,
    pub auto_refresh_enabled: bool,
    pub refresh_interval_seconds: i64,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            script: DEFAULT_SCRIPT.to_string(),
            auto_refresh_enabled: false,
            refresh_interval_seconds: DEFAULT_REFRESH_INTERVAL_SECONDS,
        }
    }
}

impl ScriptSettings {
    /// Replace blank text fields and non-positive intervals with defaults.
    pub fn normalize(&mut self) {
        if self.interpreter.trim().is_empty() {
            self.interpreter = DEFAULT_INTERPRETER.to_string();
        }
        if self.script.trim().is_empty() {
            self.script = DEFAULT_SCRIPT.to_string();
        }
        if self.refresh_interval_seconds <= 0 {
            self.refresh_interval_seconds = DEFAULT_REFRESH_INTERVAL_SECONDS;
        }
    }

    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Refresh period with the one-second lower bound applied.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_seconds.max(1) as u64)
    }
}
