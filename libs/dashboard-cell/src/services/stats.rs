use anyhow::Result;
use chrono::{Duration, NaiveDate, Utc};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_config::AppConfig;
use shared_gateway::BackendClient;

use crate::models::{
    AnalyticsPoint, AnalyticsRange, CattleOwnerStats, HealthAnalytics, OutbreakAlertSummary,
    VeterinarianStats,
};

pub struct DashboardService {
    backend: BackendClient,
}

impl DashboardService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            backend: BackendClient::new(config),
        }
    }

    pub async fn cattle_owner_stats(&self, auth_token: &str) -> Result<CattleOwnerStats> {
        debug!("Fetching cattle-owner dashboard stats");
        self.backend
            .request(
                Method::GET,
                "/api/dashboard/cattle-owner-stats/",
                Some(auth_token),
                None,
            )
            .await
    }

    pub async fn veterinarian_stats(&self, auth_token: &str) -> Result<VeterinarianStats> {
        debug!("Fetching veterinarian dashboard stats");
        self.backend
            .request(
                Method::GET,
                "/api/dashboard/veterinarian-stats/",
                Some(auth_token),
                None,
            )
            .await
    }

    pub async fn outbreak_alerts(&self, auth_token: &str) -> Result<OutbreakAlertSummary> {
        debug!("Fetching outbreak alerts");
        self.backend
            .request(
                Method::GET,
                "/api/dashboard/outbreak-alerts/",
                Some(auth_token),
                None,
            )
            .await
    }

    /// Fetches the health timeline for a named range. The upstream query is
    /// day-span based; points outside the requested window are dropped here
    /// since the upstream may return its full retention period.
    pub async fn health_analytics(
        &self,
        range: AnalyticsRange,
        auth_token: &str,
    ) -> Result<HealthAnalytics> {
        let end_date = Utc::now().date_naive();
        let start_date = end_date - Duration::days(range.days());

        let path = format!("/api/dashboard/cattle-analytics/?days={}", range.days());
        debug!("Fetching health analytics: {}", path);

        let body: Value = self
            .backend
            .request(Method::GET, &path, Some(auth_token), None)
            .await?;

        let timeline = body
            .get("timeline")
            .cloned()
            .map(decode_points)
            .unwrap_or_default();

        let health_score = body.get("health_score").and_then(Value::as_i64);

        Ok(HealthAnalytics {
            range,
            start_date,
            end_date,
            timeline: points_within(timeline, start_date, end_date),
            health_score,
        })
    }
}

fn decode_points(value: Value) -> Vec<AnalyticsPoint> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

/// Keeps points whose date falls inside `[start, end]`, sorted ascending.
pub fn points_within(
    mut points: Vec<AnalyticsPoint>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<AnalyticsPoint> {
    points.retain(|p| p.date >= start && p.date <= end);
    points.sort_by_key(|p| p.date);
    points
}
