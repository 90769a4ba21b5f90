use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsultationSummary {
    pub id: Uuid,
    pub status: ConsultationStatus,
    #[serde(default)]
    pub consultation_type: String,
    #[serde(default)]
    pub veterinarian_name: Option<String>,
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_emergency: bool,
    #[serde(default)]
    pub total_fee: Option<f64>,
}

/// One entry in a veterinarian's patient roster: a cattle owner plus the
/// animal under care.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub id: Uuid,
    #[serde(default)]
    pub owner_name: String,
    #[serde(default)]
    pub cattle_name: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub last_consultation: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(default)]
    pub notes: Vec<PatientNote>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientNote {
    pub id: Uuid,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPatientNoteRequest {
    pub note: String,
}
