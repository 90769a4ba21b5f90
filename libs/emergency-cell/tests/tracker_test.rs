use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use chrono::{Duration as ChronoDuration, Utc};
use tokio::time::Duration;
use uuid::Uuid;

use emergency_cell::models::{
    CaseStatus, EmergencyCase, EmergencyCaseType, EmergencyPriority, ProgressTier,
};
use emergency_cell::EscalationTracker;

fn pending_case(estimate_minutes: i64) -> EmergencyCase {
    EmergencyCase {
        id: Uuid::new_v4(),
        case_type: EmergencyCaseType::SymptomReport,
        priority: EmergencyPriority::Critical,
        status: CaseStatus::Pending,
        created_at: Utc::now(),
        estimated_response_time_minutes: estimate_minutes,
        assigned_veterinarian: None,
        description: "suspected bloat".to_string(),
        cattle_id: Uuid::new_v4(),
    }
}

/// Fake wall clock the test can move forward; ticks still come from the
/// (paused) tokio timer.
fn offset_clock(
    base: chrono::DateTime<chrono::Utc>,
) -> (Arc<AtomicI64>, impl Fn() -> chrono::DateTime<chrono::Utc>) {
    let offset_secs = Arc::new(AtomicI64::new(0));
    let handle = offset_secs.clone();
    let clock = move || base + ChronoDuration::seconds(handle.load(Ordering::SeqCst));
    (offset_secs, clock)
}

#[tokio::test(start_paused = true)]
async fn tracker_publishes_progress_on_each_tick() {
    let case = pending_case(10);
    let base = case.created_at;
    let (offset, clock) = offset_clock(base);

    let tracker = EscalationTracker::spawn_with_clock(case, clock);
    let mut rx = tracker.subscribe();

    // Fresh case: nothing elapsed yet.
    assert_eq!(tracker.latest().elapsed_minutes, 0);
    assert_eq!(tracker.latest().tier, ProgressTier::Success);

    // Nine of ten minutes gone: danger tier plus the escalation advisory.
    offset.store(9 * 60, Ordering::SeqCst);
    tokio::time::advance(Duration::from_secs(2)).await;
    rx.changed().await.unwrap();

    let snap = rx.borrow_and_update().clone();
    assert_eq!(snap.elapsed_minutes, 9);
    assert!((snap.progress - 90.0).abs() < 1e-9);
    assert_eq!(snap.tier, ProgressTier::Danger);
    assert!(snap.escalation_advised);
    assert!(!snap.overdue);
}

#[tokio::test(start_paused = true)]
async fn overdue_case_clamps_at_one_hundred_and_keeps_reporting() {
    let case = pending_case(10);
    let base = case.created_at;
    let (offset, clock) = offset_clock(base);

    let tracker = EscalationTracker::spawn_with_clock(case, clock);
    let mut rx = tracker.subscribe();

    offset.store(25 * 60, Ordering::SeqCst);
    tokio::time::advance(Duration::from_secs(2)).await;
    rx.changed().await.unwrap();

    let snap = rx.borrow_and_update().clone();
    assert_eq!(snap.progress, 100.0);
    assert!(snap.overdue);

    // Ticks keep flowing after the clamp; there is no terminal transition.
    tokio::time::advance(Duration::from_secs(2)).await;
    rx.changed().await.unwrap();
    assert_eq!(rx.borrow().progress, 100.0);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_tracker_tears_down_the_tick_task() {
    let case = pending_case(10);
    let base = case.created_at;
    let (_offset, clock) = offset_clock(base);

    let tracker = EscalationTracker::spawn_with_clock(case, clock);
    let mut rx = tracker.subscribe();

    drop(tracker);

    // Once the task is aborted the sender side is gone; the channel closes
    // instead of delivering further ticks.
    let closed = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if rx.changed().await.is_err() {
                break;
            }
        }
    })
    .await;

    assert!(closed.is_ok(), "tracker task kept ticking after drop");
}
