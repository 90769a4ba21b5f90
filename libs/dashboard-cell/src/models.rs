use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Herd and consultation counters shown on the cattle-owner dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CattleOwnerStats {
    #[serde(default)]
    pub total_cattle: u64,
    #[serde(default)]
    pub healthy_cattle: u64,
    #[serde(default)]
    pub sick_cattle: u64,
    #[serde(default)]
    pub under_treatment_cattle: u64,
    #[serde(default)]
    pub total_health_assessments: u64,
    #[serde(default)]
    pub diseases_detected: u64,
    #[serde(default)]
    pub total_consultations: u64,
    #[serde(default)]
    pub emergency_consultations: u64,
    #[serde(default)]
    pub disease_alerts_received: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VeterinarianStats {
    #[serde(default)]
    pub consultations_completed: u64,
    #[serde(default)]
    pub emergency_consultations: u64,
    #[serde(default)]
    pub average_response_time_minutes: f64,
    #[serde(default)]
    pub emergency_response_time_minutes: f64,
    #[serde(default)]
    pub average_rating: f32,
    #[serde(default)]
    pub positive_feedback_percentage: f64,
    #[serde(default)]
    pub diseases_diagnosed: u64,
    #[serde(default)]
    pub outbreak_responses: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutbreakAlert {
    #[serde(default)]
    pub disease_name: String,
    #[serde(default)]
    pub region_name: String,
    #[serde(default)]
    pub risk_level: String,
    #[serde(default)]
    pub case_count: u64,
    pub first_reported: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutbreakAlertSummary {
    #[serde(default)]
    pub outbreak_alerts: Vec<OutbreakAlert>,
    #[serde(default)]
    pub total_active_alerts: u64,
    pub last_updated: Option<DateTime<Utc>>,
}

/// Named analytics window, translated to a day span for the upstream query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsRange {
    Week,
    Month,
    Quarter,
    Year,
}

impl AnalyticsRange {
    pub fn days(&self) -> i64 {
        match self {
            AnalyticsRange::Week => 7,
            AnalyticsRange::Month => 30,
            AnalyticsRange::Quarter => 90,
            AnalyticsRange::Year => 365,
        }
    }
}

impl Default for AnalyticsRange {
    fn default() -> Self {
        AnalyticsRange::Month
    }
}

/// One day of the health timeline returned by the analytics endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsPoint {
    pub date: NaiveDate,
    #[serde(default)]
    pub health_score: f64,
    #[serde(default)]
    pub assessments: u64,
    #[serde(default)]
    pub consultations: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthAnalytics {
    pub range: AnalyticsRange,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub timeline: Vec<AnalyticsPoint>,
    #[serde(default)]
    pub health_score: Option<i64>,
}
