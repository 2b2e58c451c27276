#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

pub use scriptcast_test_utils::init_tracing;

/// Point the process-wide workspace at a directory unique to this test
/// binary. Must be called before the first execution in the binary, since
/// the workspace path is resolved once per process.
pub fn isolate_workspace() -> PathBuf {
    static INIT: OnceLock<PathBuf> = OnceLock::new();
    INIT.get_or_init(|| {
        let dir = std::env::temp_dir().join(format!(
            "scriptcast-{}-{}",
            env!("CARGO_CRATE_NAME"),
            std::process::id()
        ));
        // A leftover directory from a recycled process id would taint the
        // side-effect assertions.
        let _ = std::fs::remove_dir_all(&dir);
        // Tests in this binary have not resolved the workspace path yet.
        unsafe { std::env::set_var("SCRIPTCAST_WORKSPACE", &dir) };
        dir
    })
    .clone()
}

/// Write an executable helper script into `dir` and return its path.
#[cfg(unix)]
pub fn write_helper_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, body).expect("write helper script");
    let mut perms = std::fs::metadata(&path)
        .expect("stat helper script")
        .permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).expect("chmod helper script");
    path
}

/// Poll until `cond` holds, panicking after ~2 seconds.
pub async fn wait_until(what: &str, mut cond: impl FnMut() -> bool) {
    for _ in 0..200 {
        if cond() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for: {what}");
}

/// Poll until no harness files remain in the workspace.
///
/// Polling (rather than a one-shot check) tolerates harness files from
/// tests still running in parallel in the same binary.
pub async fn wait_for_workspace_clean(dir: &Path) {
    wait_until("workspace to contain no harness files", || {
        harness_files(dir).is_empty()
    })
    .await;
}

/// All `runner_*.py` files currently in `dir`.
pub fn harness_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };
    entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("runner_") && n.ends_with(".py"))
        })
        .collect()
}
