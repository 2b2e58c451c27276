mod common;

use common::{init_tracing, wait_until};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use scriptcast::config::{SettingsStore, SharedSettings};
use scriptcast::trigger::spawn_save_scheduler;

/// Store that only counts how often it was asked to save.
#[derive(Default)]
struct CountingStore {
    saves: AtomicUsize,
}

impl CountingStore {
    fn count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl SettingsStore for CountingStore {
    fn save_configuration(&self) {
        self.saves.fetch_add(1, Ordering::SeqCst);
    }
}

const DEBOUNCE: Duration = Duration::from_millis(100);

#[tokio::test]
async fn edit_burst_collapses_into_one_save() {
    init_tracing();

    let settings = SharedSettings::with_defaults();
    let store = Arc::new(CountingStore::default());
    let shutdown = CancellationToken::new();
    let scheduler = spawn_save_scheduler(
        &settings,
        Arc::clone(&store) as Arc<dyn SettingsStore>,
        DEBOUNCE,
        shutdown.clone(),
    );

    // Three edits inside the window; each one restarts the delay.
    settings.set_script("def main():\n    return 1\n");
    tokio::time::sleep(Duration::from_millis(30)).await;
    settings.set_refresh_interval_seconds(7);
    tokio::time::sleep(Duration::from_millis(30)).await;
    settings.set_auto_refresh_enabled(true);

    wait_until("the burst to be saved", || store.count() == 1).await;

    // Quiet afterwards: no further saves.
    tokio::time::sleep(DEBOUNCE * 3).await;
    assert_eq!(store.count(), 1);

    shutdown.cancel();
    scheduler.await.expect("scheduler join");
}

#[tokio::test]
async fn separate_bursts_save_separately() {
    init_tracing();

    let settings = SharedSettings::with_defaults();
    let store = Arc::new(CountingStore::default());
    let shutdown = CancellationToken::new();
    let scheduler = spawn_save_scheduler(
        &settings,
        Arc::clone(&store) as Arc<dyn SettingsStore>,
        DEBOUNCE,
        shutdown.clone(),
    );

    settings.set_script("def main():\n    return 1\n");
    wait_until("first burst to be saved", || store.count() == 1).await;

    settings.set_script("def main():\n    return 2\n");
    wait_until("second burst to be saved", || store.count() == 2).await;

    shutdown.cancel();
    scheduler.await.expect("scheduler join");
}

#[tokio::test]
async fn no_edits_means_no_saves() {
    init_tracing();

    let settings = SharedSettings::with_defaults();
    let store = Arc::new(CountingStore::default());
    let shutdown = CancellationToken::new();
    let scheduler = spawn_save_scheduler(
        &settings,
        Arc::clone(&store) as Arc<dyn SettingsStore>,
        DEBOUNCE,
        shutdown.clone(),
    );

    tokio::time::sleep(DEBOUNCE * 3).await;
    assert_eq!(store.count(), 0);

    shutdown.cancel();
    scheduler.await.expect("scheduler join");
}
