// src/config/shared.rs

//! Live configuration object shared between display and settings surfaces.
//!
//! Every surface holding the same `Arc<SharedSettings>` belongs to the same
//! configuration scope: edits made in a settings surface are observed by
//! the display surfaces through the change stream, and pointer identity of
//! the `Arc` keys the result registry.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast;

use crate::config::model::{
    DEFAULT_INTERPRETER, DEFAULT_REFRESH_INTERVAL_SECONDS, DEFAULT_SCRIPT, ScriptSettings,
};

/// Which settings field changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChange {
    InterpreterChanged,
    ScriptChanged,
    AutoRefreshToggled,
    IntervalChanged,
}

/// Opaque identity of a settings scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SettingsId(usize);

/// Shared mutable settings with change fan-out.
///
/// Setters normalize their input first and emit nothing when the stored
/// value is unchanged, so a no-op edit never wakes the trigger layer.
#[derive(Debug)]
pub struct SharedSettings {
    state: Mutex<ScriptSettings>,
    changes: broadcast::Sender<SettingsChange>,
}

impl SharedSettings {
    pub fn new(settings: ScriptSettings) -> Arc<Self> {
        let (changes, _) = broadcast::channel(16);
        Arc::new(Self {
            state: Mutex::new(settings.normalized()),
            changes,
        })
    }

    pub fn with_defaults() -> Arc<Self> {
        Self::new(ScriptSettings::default())
    }

    /// Identity of a settings scope, for keying the result registry.
    pub fn id(settings: &Arc<Self>) -> SettingsId {
        SettingsId(Arc::as_ptr(settings) as usize)
    }

    /// Current settings snapshot.
    pub fn snapshot(&self) -> ScriptSettings {
        self.state.lock().unwrap().clone()
    }

    /// Subscribe to subsequent change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SettingsChange> {
        self.changes.subscribe()
    }

    pub fn set_interpreter(&self, value: impl Into<String>) {
        let value = value.into();
        let value = if value.trim().is_empty() {
            DEFAULT_INTERPRETER.to_string()
        } else {
            value
        };

        let mut state = self.state.lock().unwrap();
        if state.interpreter == value {
            return;
        }
        state.interpreter = value;
        drop(state);

        let _ = self.changes.send(SettingsChange::InterpreterChanged);
    }

    pub fn set_script(&self, value: impl Into<String>) {
        let value = value.into();
        let value = if value.trim().is_empty() {
            DEFAULT_SCRIPT.to_string()
        } else {
            value
        };

        let mut state = self.state.lock().unwrap();
        if state.script == value {
            return;
        }
        state.script = value;
        drop(state);

        let _ = self.changes.send(SettingsChange::ScriptChanged);
    }

    pub fn set_auto_refresh_enabled(&self, value: bool) {
        let mut state = self.state.lock().unwrap();
        if state.auto_refresh_enabled == value {
            return;
        }
        state.auto_refresh_enabled = value;
        drop(state);

        let _ = self.changes.send(SettingsChange::AutoRefreshToggled);
    }

    pub fn set_refresh_interval_seconds(&self, value: i64) {
        let normalized = if value <= 0 {
            DEFAULT_REFRESH_INTERVAL_SECONDS
        } else {
            value
        };

        let mut state = self.state.lock().unwrap();
        if state.refresh_interval_seconds == normalized {
            return;
        }
        state.refresh_interval_seconds = normalized;
        drop(state);

        let _ = self.changes.send(SettingsChange::IntervalChanged);
    }
}
