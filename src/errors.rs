// src/errors.rs

//! Crate-wide error aliases and helpers.
//!
//! Note that faults inside a script execution never surface as these
//! errors: the process runner folds everything below its boundary into a
//! failure [`ExecutionResult`](crate::types::ExecutionResult).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScriptcastError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, ScriptcastError>;
