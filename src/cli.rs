// src/cli.rs

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Command-line arguments for the `scriptcast` binary.
#[derive(Debug, Parser)]
#[command(
    name = "scriptcast",
    about = "Run a user script through an external interpreter and print its returned value."
)]
pub struct CliArgs {
    /// Path to a TOML settings file.
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Path to a script file (overrides the script from --config).
    #[arg(long)]
    pub script_file: Option<PathBuf>,

    /// Interpreter binary (overrides the interpreter from --config).
    #[arg(long)]
    pub interpreter: Option<String>,

    /// Keep running, refreshing on the configured interval until Ctrl-C.
    #[arg(long)]
    pub watch: bool,

    /// Log level (overrides SCRIPTCAST_LOG).
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}
