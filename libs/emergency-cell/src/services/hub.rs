use std::collections::HashMap;

use tokio::sync::{watch, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::models::{EmergencyCase, ProgressSnapshot};
use crate::services::escalation::EscalationTracker;

/// Registry of live escalation trackers, one per on-screen emergency case.
/// Tracking a case spawns its tick task; untracking (or replacing it with a
/// fresher copy of the case) drops the tracker and tears the task down.
pub struct ProgressHub {
    trackers: RwLock<HashMap<Uuid, EscalationTracker>>,
}

impl ProgressHub {
    pub fn new() -> Self {
        Self {
            trackers: RwLock::new(HashMap::new()),
        }
    }

    /// Starts (or restarts) live tracking for a case and returns the first
    /// snapshot. Inserting over an existing entry drops the old tracker.
    pub async fn track(&self, case: EmergencyCase) -> ProgressSnapshot {
        let case_id = case.id;
        let tracker = EscalationTracker::spawn(case);
        let snapshot = tracker.latest();

        let mut trackers = self.trackers.write().await;
        trackers.insert(case_id, tracker);
        debug!("Tracking escalation progress for case {}", case_id);

        snapshot
    }

    /// Latest published snapshot, `None` when the case is not tracked.
    pub async fn latest(&self, case_id: Uuid) -> Option<ProgressSnapshot> {
        let trackers = self.trackers.read().await;
        trackers.get(&case_id).map(EscalationTracker::latest)
    }

    /// Subscription to a tracked case's tick stream.
    pub async fn subscribe(&self, case_id: Uuid) -> Option<watch::Receiver<ProgressSnapshot>> {
        let trackers = self.trackers.read().await;
        trackers.get(&case_id).map(EscalationTracker::subscribe)
    }

    /// Stops tracking. Returns whether a tracker was actually removed.
    pub async fn untrack(&self, case_id: Uuid) -> bool {
        let mut trackers = self.trackers.write().await;
        let removed = trackers.remove(&case_id).is_some();
        if removed {
            debug!("Stopped tracking case {}", case_id);
        }
        removed
    }

    pub async fn tracked_cases(&self) -> Vec<Uuid> {
        let trackers = self.trackers.read().await;
        trackers.keys().copied().collect()
    }
}

impl Default for ProgressHub {
    fn default() -> Self {
        Self::new()
    }
}
