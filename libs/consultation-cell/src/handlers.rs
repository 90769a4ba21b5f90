use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use axum_extra::TypedHeader;
use headers::{authorization::Bearer, Authorization};
use serde::Deserialize;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::AddPatientNoteRequest;
use crate::services::consultations::ConsultationService;

#[derive(Debug, Deserialize)]
pub struct ConsultationListQuery {
    pub page: Option<u32>,
}

#[axum::debug_handler]
pub async fn list_consultations(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<ConsultationListQuery>,
) -> Result<Json<Value>, AppError> {
    let service = ConsultationService::new(&state);

    let page = service
        .list(query.page, auth.token())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!({
        "consultations": page.items,
        "total": page.total,
        "page_size": page.page_size
    })))
}

#[axum::debug_handler]
pub async fn get_my_patients(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = ConsultationService::new(&state);

    let page = service
        .get_my_patients(auth.token())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!({
        "patients": page.items,
        "total": page.total
    })))
}

#[axum::debug_handler]
pub async fn get_patient_detail(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = ConsultationService::new(&state);

    let patient = service
        .get_patient_detail(&patient_id, auth.token())
        .await
        .map_err(|_| AppError::NotFound("Patient not found".to_string()))?;

    Ok(Json(json!(patient)))
}

#[axum::debug_handler]
pub async fn add_patient_note(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(patient_id): Path<String>,
    Json(request): Json<AddPatientNoteRequest>,
) -> Result<Json<Value>, AppError> {
    if request.note.trim().is_empty() {
        return Err(AppError::ValidationError("Note must not be empty".to_string()));
    }

    let service = ConsultationService::new(&state);

    let note = service
        .add_patient_note(&patient_id, request, auth.token())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!(note)))
}

#[axum::debug_handler]
pub async fn mark_patient_completed(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(patient_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = ConsultationService::new(&state);

    let patient = service
        .mark_patient_completed(&patient_id, auth.token())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!(patient)))
}
