// src/config/store.rs

//! Settings persistence: TOML loading plus the debounced save target.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::model::ScriptSettings;
use crate::config::shared::SharedSettings;
use crate::errors::Result;

/// Load settings from a TOML file.
///
/// Defaults are applied by serde for missing fields; the result is
/// normalized so a hand-edited blank value never reaches the runner.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<ScriptSettings> {
    let contents = fs::read_to_string(path.as_ref())?;
    let settings: ScriptSettings = toml::from_str(&contents)?;
    Ok(settings.normalized())
}

/// Receives the debounced "save now" signal.
///
/// The hosting application decides where and how settings are stored; the
/// trigger layer only promises at most one call per debounce window.
pub trait SettingsStore: Send + Sync {
    fn save_configuration(&self);
}

/// Store that writes the current settings snapshot back as TOML.
pub struct TomlFileStore {
    path: PathBuf,
    settings: Arc<SharedSettings>,
}

impl TomlFileStore {
    pub fn new(path: impl Into<PathBuf>, settings: Arc<SharedSettings>) -> Self {
        Self {
            path: path.into(),
            settings,
        }
    }
}

impl SettingsStore for TomlFileStore {
    fn save_configuration(&self) {
        let snapshot = self.settings.snapshot();
        match toml::to_string_pretty(&snapshot) {
            Ok(rendered) => match fs::write(&self.path, rendered) {
                Ok(()) => debug!(path = ?self.path, "settings saved"),
                Err(err) => {
                    warn!(path = ?self.path, error = %err, "failed to write settings file");
                }
            },
            Err(err) => warn!(error = %err, "failed to serialize settings"),
        }
    }
}
