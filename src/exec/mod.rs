// src/exec/mod.rs

//! Script execution layer.
//!
//! This module turns user script text into a classified result, using
//! `tokio::process::Command` for the interpreter child process.
//!
//! - [`harness`] wraps the user script into a runnable program.
//! - [`workspace`] owns the process-wide directory for harness files.
//! - [`encoding`] pins the child stream encoding.
//! - [`runner`] drives a single interpreter process to a classified
//!   outcome and is the crate's sole fault boundary.
//! - [`gate`] is the per-consumer admission guard.
//! - [`backend`] provides the `ScriptExecutor` trait and the production
//!   `ProcessExecutor`, which tests can replace with a fake implementation.

pub mod backend;
pub mod encoding;
pub mod gate;
pub mod harness;
pub mod runner;
pub mod workspace;

pub use backend::{ProcessExecutor, ScriptExecutor};
pub use gate::{ExecutionGate, ExecutionPermit};
pub use runner::run_script;
