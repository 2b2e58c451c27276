use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use scriptcast::exec::ExecutionGate;
use scriptcast_test_utils::init_tracing;

#[test]
fn second_acquire_is_rejected_while_permit_is_held() {
    let gate = ExecutionGate::new();

    let permit = gate.try_acquire().expect("first acquire");
    assert!(gate.try_acquire().is_none());

    drop(permit);
    assert!(gate.try_acquire().is_some());
}

#[test]
fn clones_share_the_same_admission() {
    let gate = ExecutionGate::new();
    let clone = gate.clone();

    let _permit = gate.try_acquire().expect("first acquire");
    assert!(clone.try_acquire().is_none());
}

#[tokio::test]
async fn concurrent_attempts_admit_exactly_one() {
    init_tracing();

    let gate = ExecutionGate::new();
    let admitted = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for _ in 0..8 {
        let gate = gate.clone();
        let admitted = Arc::clone(&admitted);
        handles.push(tokio::spawn(async move {
            if let Some(_permit) = gate.try_acquire() {
                admitted.fetch_add(1, Ordering::SeqCst);
                // Hold the permit long enough for every other attempt.
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            }
        }));
    }

    for handle in handles {
        handle.await.expect("task join");
    }

    assert_eq!(admitted.load(Ordering::SeqCst), 1);
}
