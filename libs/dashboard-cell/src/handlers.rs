use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::AnalyticsRange;
use crate::services::stats::DashboardService;

#[axum::debug_handler]
pub async fn get_cattle_owner_stats(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = DashboardService::new(&state);

    let stats = service
        .cattle_owner_stats(auth.token())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!(stats)))
}

#[axum::debug_handler]
pub async fn get_veterinarian_stats(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = DashboardService::new(&state);

    let stats = service
        .veterinarian_stats(auth.token())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!(stats)))
}

#[axum::debug_handler]
pub async fn get_outbreak_alerts(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = DashboardService::new(&state);

    let summary = service
        .outbreak_alerts(auth.token())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!(summary)))
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub range: Option<AnalyticsRange>,
}

#[axum::debug_handler]
pub async fn get_health_analytics(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<AnalyticsQuery>,
) -> Result<Json<Value>, AppError> {
    let service = DashboardService::new(&state);

    let analytics = service
        .health_analytics(query.range.unwrap_or_default(), auth.token())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!(analytics)))
}
