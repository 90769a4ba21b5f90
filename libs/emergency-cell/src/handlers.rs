use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use chrono::Utc;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{CaseStatus, EmergencyBookingRequest, EmergencyError};
use crate::services::booking::EmergencyBookingService;
use crate::services::cases::EmergencyCaseService;
use crate::services::escalation;
use crate::services::hub::ProgressHub;

pub struct EmergencyState {
    pub config: Arc<AppConfig>,
    pub hub: ProgressHub,
}

impl EmergencyState {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self {
            config,
            hub: ProgressHub::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    pub last_known_status: Option<CaseStatus>,
}

impl From<EmergencyError> for AppError {
    fn from(err: EmergencyError) -> Self {
        match err {
            EmergencyError::AcknowledgementRequired => AppError::BadRequest(err.to_string()),
            EmergencyError::VeterinarianUnavailable => AppError::Conflict(err.to_string()),
            EmergencyError::VeterinarianNotFound => AppError::NotFound(err.to_string()),
            EmergencyError::Upstream(msg) => AppError::Upstream(msg),
        }
    }
}

#[axum::debug_handler]
pub async fn book_emergency_consultation(
    State(state): State<Arc<EmergencyState>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Json(request): Json<EmergencyBookingRequest>,
) -> Result<Json<Value>, AppError> {
    let booking_service = EmergencyBookingService::new(&state.config);

    let confirmation = booking_service.book(request, auth.token()).await?;

    Ok(Json(json!(confirmation)))
}

#[axum::debug_handler]
pub async fn list_emergency_cases(
    State(state): State<Arc<EmergencyState>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let case_service = EmergencyCaseService::new(&state.config);

    let page = case_service
        .list_cases(auth.token())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!({
        "cases": page.items,
        "total": page.total
    })))
}

#[axum::debug_handler]
pub async fn get_case_progress(
    State(state): State<Arc<EmergencyState>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(case_id): Path<String>,
    Query(query): Query<ProgressQuery>,
) -> Result<Json<Value>, AppError> {
    let case_service = EmergencyCaseService::new(&state.config);

    let case = case_service
        .get_case(&case_id, query.last_known_status, auth.token())
        .await
        .map_err(|_| AppError::NotFound("Emergency case not found".to_string()))?;

    let progress = escalation::snapshot(&case, Utc::now());

    Ok(Json(json!({
        "case": case,
        "progress": progress
    })))
}

/// Starts live tracking: fetches the case upstream and spawns its tick task.
#[axum::debug_handler]
pub async fn start_case_tracking(
    State(state): State<Arc<EmergencyState>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(case_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let case_service = EmergencyCaseService::new(&state.config);

    let case = case_service
        .get_case(&case_id, None, auth.token())
        .await
        .map_err(|_| AppError::NotFound("Emergency case not found".to_string()))?;

    let progress = state.hub.track(case.clone()).await;

    Ok(Json(json!({
        "case": case,
        "progress": progress,
        "tracked": true
    })))
}

/// Latest snapshot published by a live tracker.
#[axum::debug_handler]
pub async fn get_tracked_progress(
    State(state): State<Arc<EmergencyState>>,
    Path(case_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    match state.hub.latest(case_id).await {
        Some(progress) => Ok(Json(json!({ "progress": progress, "tracked": true }))),
        None => Err(AppError::NotFound("Case is not being tracked".to_string())),
    }
}

/// Stops live tracking and tears down the case's tick task.
#[axum::debug_handler]
pub async fn stop_case_tracking(
    State(state): State<Arc<EmergencyState>>,
    Path(case_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    if state.hub.untrack(case_id).await {
        Ok(Json(json!({ "tracked": false })))
    } else {
        Err(AppError::NotFound("Case is not being tracked".to_string()))
    }
}
