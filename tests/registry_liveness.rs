use std::sync::{Arc, Mutex};

use scriptcast::config::SharedSettings;
use scriptcast::registry::{ResultConsumer, ResultRegistry};
use scriptcast::types::ExecutionResult;
use scriptcast_test_utils::init_tracing;

/// Consumer that records every result applied to it.
struct RecordingConsumer {
    applied: Mutex<Vec<ExecutionResult>>,
}

impl RecordingConsumer {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            applied: Mutex::new(Vec::new()),
        })
    }

    fn applied(&self) -> Vec<ExecutionResult> {
        self.applied.lock().unwrap().clone()
    }
}

impl ResultConsumer for RecordingConsumer {
    fn apply_result(&self, result: &ExecutionResult) {
        self.applied.lock().unwrap().push(result.clone());
    }
}

/// Coerce a concrete consumer handle into the trait-object `Weak` the
/// registry stores. The unsizing coercion happens at this return site.
fn weak_consumer(consumer: &Arc<RecordingConsumer>) -> std::sync::Weak<dyn ResultConsumer> {
    let weak: std::sync::Weak<RecordingConsumer> = Arc::downgrade(consumer);
    weak
}

#[test]
fn broadcast_skips_destroyed_consumers() {
    init_tracing();

    let settings = SharedSettings::with_defaults();
    let registry = ResultRegistry::new();

    let a = RecordingConsumer::new();
    let b = RecordingConsumer::new();
    registry.register(&settings, weak_consumer(&a));
    registry.register(&settings, weak_consumer(&b));

    drop(a);

    let result = ExecutionResult::ok("42");
    registry.broadcast(&settings, &result);

    assert_eq!(b.applied(), vec![result]);
    assert_eq!(registry.snapshot(&settings).len(), 1);
}

#[test]
fn snapshot_prunes_and_never_resurrects() {
    init_tracing();

    let settings = SharedSettings::with_defaults();
    let registry = ResultRegistry::new();

    let a = RecordingConsumer::new();
    registry.register(&settings, weak_consumer(&a));
    assert_eq!(registry.snapshot(&settings).len(), 1);

    drop(a);
    assert!(registry.snapshot(&settings).is_empty());
    assert!(registry.snapshot(&settings).is_empty());
}

#[test]
fn duplicate_registration_is_a_noop() {
    init_tracing();

    let settings = SharedSettings::with_defaults();
    let registry = ResultRegistry::new();

    let a = RecordingConsumer::new();
    registry.register(&settings, weak_consumer(&a));
    registry.register(&settings, weak_consumer(&a));

    registry.broadcast(&settings, &ExecutionResult::ok("once"));
    assert_eq!(a.applied().len(), 1);
}

#[test]
fn scopes_are_isolated_by_settings_identity() {
    init_tracing();

    let settings_one = SharedSettings::with_defaults();
    let settings_two = SharedSettings::with_defaults();
    let registry = ResultRegistry::new();

    let a = RecordingConsumer::new();
    let b = RecordingConsumer::new();
    registry.register(&settings_one, weak_consumer(&a));
    registry.register(&settings_two, weak_consumer(&b));

    registry.broadcast(&settings_one, &ExecutionResult::ok("for a"));

    assert_eq!(a.applied().len(), 1);
    assert!(b.applied().is_empty());
}

#[test]
fn failure_results_render_the_fixed_placeholder() {
    let result = ExecutionResult::failed("script execution failed", "Traceback ...");
    assert_eq!(result.display_text(), "Error");
    assert_eq!(
        result.status_line(),
        "script execution failed: Traceback ..."
    );

    let ok = ExecutionResult::ok("hello world!");
    assert_eq!(ok.display_text(), "hello world!");
    assert_eq!(ok.status_line(), "succeeded: hello world!");
}
