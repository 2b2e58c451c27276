#![allow(dead_code)]

use scriptcast::config::ScriptSettings;

/// Builder for `ScriptSettings` to simplify test setup.
pub struct SettingsBuilder {
    settings: ScriptSettings,
}

impl SettingsBuilder {
    pub fn new() -> Self {
        Self {
            settings: ScriptSettings::default(),
        }
    }

    pub fn script(mut self, script: &str) -> Self {
        self.settings.script = script.to_string();
        self
    }

    pub fn interpreter(mut self, interpreter: &str) -> Self {
        self.settings.interpreter = interpreter.to_string();
        self
    }

    pub fn auto_refresh(mut self, enabled: bool) -> Self {
        self.settings.auto_refresh_enabled = enabled;
        self
    }

    pub fn interval_seconds(mut self, seconds: i64) -> Self {
        self.settings.refresh_interval_seconds = seconds;
        self
    }

    /// Raw settings, exactly as configured.
    pub fn build_raw(self) -> ScriptSettings {
        self.settings
    }

    /// Settings with normalization applied, as the crate would store them.
    pub fn build(self) -> ScriptSettings {
        self.settings.normalized()
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
