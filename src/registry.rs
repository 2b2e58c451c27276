// src/registry.rs

//! Result fan-out registry.
//!
//! Maps a settings scope to the display surfaces currently subscribed to
//! it, so a single execution (from any surface) can be applied everywhere.
//! Consumers are held through `Weak` references: the registry never
//! extends a surface's lifetime, and entries for dropped consumers are
//! pruned on every access instead of requiring explicit unregistration.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use tracing::debug;

use crate::config::shared::{SettingsId, SharedSettings};
use crate::types::ExecutionResult;

/// Capability exposed by anything that can display an execution result.
///
/// `apply_result` is called from the broadcast path. It must be idempotent
/// and safe to invoke while the consumer's own execution is independently
/// in flight.
pub trait ResultConsumer: Send + Sync {
    fn apply_result(&self, result: &ExecutionResult);
}

/// Registry of live consumers per settings scope.
///
/// All operations serialize on one mutex; delivery itself happens outside
/// the lock so a consumer may re-enter the registry from `apply_result`.
#[derive(Default)]
pub struct ResultRegistry {
    buckets: Mutex<HashMap<SettingsId, Vec<Weak<dyn ResultConsumer>>>>,
}

impl ResultRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `consumer` with the settings scope.
    ///
    /// Dead entries in the bucket are dropped first; registering a
    /// consumer that is already present is a no-op.
    pub fn register(&self, settings: &Arc<SharedSettings>, consumer: Weak<dyn ResultConsumer>) {
        let mut buckets = self.buckets.lock().unwrap();
        let bucket = buckets.entry(SharedSettings::id(settings)).or_default();
        bucket.retain(|existing| existing.strong_count() > 0);
        if bucket.iter().any(|existing| Weak::ptr_eq(existing, &consumer)) {
            return;
        }
        bucket.push(consumer);
    }

    /// Every consumer still alive for the settings scope, in registration
    /// order. Dead entries are pruned as a side effect, and a bucket that
    /// ends up empty is removed entirely.
    pub fn snapshot(&self, settings: &Arc<SharedSettings>) -> Vec<Arc<dyn ResultConsumer>> {
        let mut buckets = self.buckets.lock().unwrap();
        let Some(bucket) = buckets.get_mut(&SharedSettings::id(settings)) else {
            return Vec::new();
        };

        let live: Vec<Arc<dyn ResultConsumer>> = bucket.iter().filter_map(Weak::upgrade).collect();
        bucket.retain(|entry| entry.strong_count() > 0);
        if bucket.is_empty() {
            buckets.remove(&SharedSettings::id(settings));
        }
        live
    }

    /// Deliver `result` to every live consumer of the settings scope,
    /// one at a time.
    pub fn broadcast(&self, settings: &Arc<SharedSettings>, result: &ExecutionResult) {
        let consumers = self.snapshot(settings);
        debug!(
            consumers = consumers.len(),
            success = result.success,
            "broadcasting execution result"
        );
        for consumer in consumers {
            consumer.apply_result(result);
        }
    }
}
