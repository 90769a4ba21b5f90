use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;

pub fn dashboard_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/cattle-owner-stats", get(handlers::get_cattle_owner_stats))
        .route("/veterinarian-stats", get(handlers::get_veterinarian_stats))
        .route("/outbreak-alerts", get(handlers::get_outbreak_alerts))
        .route("/health-analytics", get(handlers::get_health_analytics))
        .with_state(state)
}
