use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::warn;

use crate::models::{CaseStatus, EmergencyCase, ProgressSnapshot, ProgressTier};

/// Progress above this percentage on a still-pending case raises the
/// escalation advisory. Visual only; any actual re-routing stays upstream.
pub const ESCALATION_THRESHOLD: f64 = 80.0;

const TICK: Duration = Duration::from_secs(1);

/// Whole minutes since the case was created, clamped at zero for clock skew.
pub fn elapsed_minutes(created_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    ((now - created_at).num_seconds() / 60).max(0)
}

/// Fraction of the response-time budget consumed, as a 0-100 percentage.
/// A non-positive budget means the case counts as already overdue rather
/// than dividing by zero.
pub fn progress_percent(elapsed_minutes: i64, estimated_response_time_minutes: i64) -> f64 {
    if estimated_response_time_minutes <= 0 {
        return 100.0;
    }
    (elapsed_minutes as f64 * 100.0 / estimated_response_time_minutes as f64).min(100.0)
}

/// Bucket boundaries are strict-less-than: exactly 50 is warning, exactly 80
/// is danger.
pub fn tier(progress: f64) -> ProgressTier {
    if progress < 50.0 {
        ProgressTier::Success
    } else if progress < 80.0 {
        ProgressTier::Warning
    } else {
        ProgressTier::Danger
    }
}

pub fn escalation_advised(progress: f64, status: CaseStatus) -> bool {
    progress > ESCALATION_THRESHOLD && status == CaseStatus::Pending
}

pub fn snapshot(case: &EmergencyCase, now: DateTime<Utc>) -> ProgressSnapshot {
    let elapsed = elapsed_minutes(case.created_at, now);
    let progress = progress_percent(elapsed, case.estimated_response_time_minutes);

    ProgressSnapshot {
        elapsed_minutes: elapsed,
        progress,
        tier: tier(progress),
        escalation_advised: escalation_advised(progress, case.status),
        overdue: progress >= 100.0,
    }
}

/// Recomputes one case's progress on a 1-second tick and publishes snapshots
/// over a watch channel. Dropping the tracker aborts the tick task, so
/// teardown is deterministic - nothing keeps ticking after the case leaves
/// the screen.
pub struct EscalationTracker {
    rx: watch::Receiver<ProgressSnapshot>,
    task: JoinHandle<()>,
}

impl EscalationTracker {
    pub fn spawn(case: EmergencyCase) -> Self {
        Self::spawn_with_clock(case, Utc::now)
    }

    /// Clock injection seam for tests; production callers use [`spawn`].
    ///
    /// [`spawn`]: EscalationTracker::spawn
    pub fn spawn_with_clock<C>(case: EmergencyCase, clock: C) -> Self
    where
        C: Fn() -> DateTime<Utc> + Send + 'static,
    {
        let (tx, rx) = watch::channel(snapshot(&case, clock()));

        let task = tokio::spawn(async move {
            let mut tick = interval(TICK);
            tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut advised = false;

            loop {
                tick.tick().await;
                let snap = snapshot(&case, clock());

                if snap.escalation_advised && !advised {
                    advised = true;
                    warn!(
                        "Emergency case {} has consumed over {}% of its response budget and is still pending",
                        case.id, ESCALATION_THRESHOLD
                    );
                }

                if tx.send(snap).is_err() {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    pub fn latest(&self) -> ProgressSnapshot {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ProgressSnapshot> {
        self.rx.clone()
    }
}

impl Drop for EscalationTracker {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmergencyCaseType, EmergencyPriority};
    use chrono::Duration as ChronoDuration;
    use uuid::Uuid;

    fn case_with(created_minutes_ago: i64, estimate: i64, status: CaseStatus) -> EmergencyCase {
        EmergencyCase {
            id: Uuid::new_v4(),
            case_type: EmergencyCaseType::Consultation,
            priority: EmergencyPriority::High,
            status,
            created_at: Utc::now() - ChronoDuration::minutes(created_minutes_ago),
            estimated_response_time_minutes: estimate,
            assigned_veterinarian: None,
            description: "downer cow, not eating".to_string(),
            cattle_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn nine_of_ten_minutes_is_danger_with_advisory() {
        let case = case_with(9, 10, CaseStatus::Pending);
        let snap = snapshot(&case, Utc::now());

        assert_eq!(snap.elapsed_minutes, 9);
        assert!((snap.progress - 90.0).abs() < 1e-9);
        assert_eq!(snap.tier, ProgressTier::Danger);
        assert!(snap.escalation_advised);
        assert!(!snap.overdue);
    }

    #[test]
    fn zero_estimate_is_immediately_overdue() {
        let case = case_with(0, 0, CaseStatus::Pending);
        let snap = snapshot(&case, Utc::now());

        assert_eq!(snap.progress, 100.0);
        assert!(snap.overdue);
        assert_eq!(snap.tier, ProgressTier::Danger);
    }

    #[test]
    fn negative_estimate_is_guarded_like_zero() {
        assert_eq!(progress_percent(5, -3), 100.0);
    }

    #[test]
    fn progress_clamps_at_one_hundred() {
        assert_eq!(progress_percent(25, 10), 100.0);
        assert_eq!(progress_percent(10, 10), 100.0);
    }

    #[test]
    fn progress_is_monotone_in_elapsed_time() {
        let mut last = -1.0;
        for elapsed in 0..30 {
            let p = progress_percent(elapsed, 12);
            assert!(p >= last);
            last = p;
        }
    }

    #[test]
    fn tier_boundaries_are_inclusive_upwards() {
        assert_eq!(tier(49.9), ProgressTier::Success);
        assert_eq!(tier(50.0), ProgressTier::Warning);
        assert_eq!(tier(79.9), ProgressTier::Warning);
        assert_eq!(tier(80.0), ProgressTier::Danger);
    }

    #[test]
    fn advisory_requires_pending_status() {
        assert!(escalation_advised(90.0, CaseStatus::Pending));
        assert!(!escalation_advised(90.0, CaseStatus::Assigned));
        assert!(!escalation_advised(80.0, CaseStatus::Pending));
    }

    #[test]
    fn future_created_at_clamps_elapsed_to_zero() {
        let now = Utc::now();
        assert_eq!(elapsed_minutes(now + ChronoDuration::minutes(5), now), 0);
    }
}
