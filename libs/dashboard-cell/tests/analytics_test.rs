use chrono::{Duration, Utc};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dashboard_cell::{AnalyticsRange, DashboardService};
use shared_config::AppConfig;

fn test_config(base_url: &str) -> AppConfig {
    AppConfig {
        backend_api_url: base_url.to_string(),
        backend_api_key: "test-key".to_string(),
        session_file: None,
    }
}

#[tokio::test]
async fn analytics_filters_timeline_to_requested_range() {
    let server = MockServer::start().await;

    let today = Utc::now().date_naive();
    let in_range = (today - Duration::days(3)).to_string();
    let out_of_range = (today - Duration::days(40)).to_string();

    Mock::given(method("GET"))
        .and(path("/api/dashboard/cattle-analytics/"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "health_score": 82,
            "timeline": [
                { "date": in_range, "health_score": 84.0, "assessments": 2 },
                { "date": out_of_range, "health_score": 60.0, "assessments": 1 }
            ]
        })))
        .mount(&server)
        .await;

    let service = DashboardService::new(&test_config(&server.uri()));
    let analytics = service
        .health_analytics(AnalyticsRange::Week, "token")
        .await
        .unwrap();

    assert_eq!(analytics.range, AnalyticsRange::Week);
    assert_eq!(analytics.health_score, Some(82));
    assert_eq!(analytics.timeline.len(), 1);
    assert_eq!(analytics.timeline[0].health_score, 84.0);
}

#[tokio::test]
async fn owner_stats_decode_with_missing_fields_defaulted() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/dashboard/cattle-owner-stats/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_cattle": 42,
            "healthy_cattle": 38,
            "sick_cattle": 4
        })))
        .mount(&server)
        .await;

    let service = DashboardService::new(&test_config(&server.uri()));
    let stats = service.cattle_owner_stats("token").await.unwrap();

    assert_eq!(stats.total_cattle, 42);
    assert_eq!(stats.sick_cattle, 4);
    assert_eq!(stats.emergency_consultations, 0);
}
