// src/config/mod.rs

//! Script execution settings: data model, shared live object, persistence.

pub mod model;
pub mod shared;
pub mod store;

pub use model::{
    DEFAULT_INTERPRETER, DEFAULT_REFRESH_INTERVAL_SECONDS, DEFAULT_SCRIPT, ScriptSettings,
};
pub use shared::{SettingsChange, SettingsId, SharedSettings};
pub use store::{SettingsStore, TomlFileStore, load_from_path};
