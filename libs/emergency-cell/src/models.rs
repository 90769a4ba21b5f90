use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use vet_directory_cell::models::ConsultationChannel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyCaseType {
    Consultation,
    SymptomReport,
    HealthAlert,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyPriority {
    High,
    Critical,
}

/// Case lifecycle as driven by the upstream backend. The gateway never
/// transitions a case itself; it only renders the state it receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    Pending,
    Assigned,
    InProgress,
    Resolved,
}

impl CaseStatus {
    fn rank(self) -> u8 {
        match self {
            CaseStatus::Pending => 0,
            CaseStatus::Assigned => 1,
            CaseStatus::InProgress => 2,
            CaseStatus::Resolved => 3,
        }
    }

    /// Statuses only ever move forward; no backward transition is defined.
    pub fn can_advance_to(self, next: CaseStatus) -> bool {
        next.rank() > self.rank()
    }

    /// Accepts `incoming` only when it is a forward move, otherwise keeps
    /// the already-known status. Guards against out-of-order upstream reads.
    pub fn reconcile(self, incoming: CaseStatus) -> CaseStatus {
        if self == incoming || self.can_advance_to(incoming) {
            incoming
        } else {
            tracing::warn!(
                "Ignoring backward case status update {:?} -> {:?}",
                self,
                incoming
            );
            self
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignedVeterinarian {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyCase {
    pub id: Uuid,
    pub case_type: EmergencyCaseType,
    pub priority: EmergencyPriority,
    pub status: CaseStatus,
    pub created_at: DateTime<Utc>,
    pub estimated_response_time_minutes: i64,
    #[serde(default)]
    pub assigned_veterinarian: Option<AssignedVeterinarian>,
    #[serde(default)]
    pub description: String,
    pub cattle_id: Uuid,
}

/// Color tier the progress bar renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressTier {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub elapsed_minutes: i64,
    pub progress: f64,
    pub tier: ProgressTier,
    pub escalation_advised: bool,
    pub overdue: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmergencyBookingRequest {
    pub veterinarian_id: Uuid,
    pub cattle_id: Uuid,
    pub channel: ConsultationChannel,
    pub description: String,
    pub priority: EmergencyPriority,
    /// First gate acknowledgement: this is a genuine emergency.
    pub genuine_emergency_acknowledged: bool,
    /// Second gate acknowledgement: the surcharge is understood.
    pub surcharge_acknowledged: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmergencyCharge {
    pub base_fee: f64,
    pub surcharge: f64,
    pub total_fee: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BookingConfirmation {
    pub consultation_id: Uuid,
    pub status: String,
    pub charge: EmergencyCharge,
}

#[derive(Error, Debug)]
pub enum EmergencyError {
    #[error("Both emergency acknowledgements are required before booking")]
    AcknowledgementRequired,

    #[error("Veterinarian does not accept emergency consultations")]
    VeterinarianUnavailable,

    #[error("Veterinarian not found")]
    VeterinarianNotFound,

    #[error("Upstream error: {0}")]
    Upstream(String),
}
