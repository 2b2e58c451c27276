// src/trigger/save.rs

//! Debounced persistence of settings edits.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::{SettingsStore, SharedSettings};

/// Default quiet period before an edit burst is persisted.
pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(600);

/// Spawn the save scheduler for a settings scope.
///
/// Any settings change opens the debounce window; each further change
/// within the window restarts it. When the window elapses quietly,
/// `store.save_configuration()` is called exactly once for the burst.
pub fn spawn_save_scheduler(
    settings: &Arc<SharedSettings>,
    store: Arc<dyn SettingsStore>,
    debounce: Duration,
    shutdown: CancellationToken,
) -> JoinHandle<()> {
    let mut changes = settings.subscribe();

    tokio::spawn(async move {
        loop {
            // Wait for the first edit of a burst.
            tokio::select! {
                _ = shutdown.cancelled() => break,
                change = changes.recv() => match change {
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                },
            }

            // Quiet period, restarted by every further edit.
            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => return,
                    change = changes.recv() => match change {
                        Ok(_) | Err(RecvError::Lagged(_)) => continue,
                        Err(RecvError::Closed) => return,
                    },
                    _ = sleep(debounce) => {
                        debug!("settings quiet; saving configuration");
                        store.save_configuration();
                        break;
                    }
                }
            }
        }
    })
}
