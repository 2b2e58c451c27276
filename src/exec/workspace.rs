// src/exec/workspace.rs

//! Process-wide workspace directory for ephemeral harness files.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, warn};

/// Directory name under the per-user application-data location.
const WORKSPACE_DIR_NAME: &str = "scriptcast";

/// File name prefix for ephemeral harness scripts.
pub const HARNESS_PREFIX: &str = "runner_";

static WORKSPACE: OnceLock<PathBuf> = OnceLock::new();

/// Workspace directory holding `runner_<id>.py` files.
///
/// Resolved once per process: `SCRIPTCAST_WORKSPACE` if set, otherwise the
/// platform per-user application-data directory, otherwise the system temp
/// directory. The directory itself is created lazily by the runner, so
/// merely resolving the path has no filesystem side effects.
pub fn workspace_dir() -> &'static Path {
    WORKSPACE.get_or_init(|| {
        if let Some(dir) = std::env::var_os("SCRIPTCAST_WORKSPACE") {
            return PathBuf::from(dir);
        }
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(WORKSPACE_DIR_NAME)
    })
}

/// Remove leftover harness files from a previous abnormal termination.
///
/// Every execution deletes its own file, so anything matching the harness
/// naming scheme at startup is stale. Orphans are harmless; failures here
/// are logged and ignored.
pub fn purge_stale_scripts() {
    let entries = match fs::read_dir(workspace_dir()) {
        Ok(entries) => entries,
        Err(_) => return, // workspace not created yet; nothing to purge
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(HARNESS_PREFIX) && name.ends_with(".py") {
            match fs::remove_file(entry.path()) {
                Ok(()) => debug!(file = %name, "purged stale harness file"),
                Err(err) => warn!(file = %name, error = %err, "failed to purge stale harness file"),
            }
        }
    }
}
