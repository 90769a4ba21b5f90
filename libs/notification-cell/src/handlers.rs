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

use crate::services::notifications::NotificationService;

#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    pub unread: Option<bool>,
}

#[axum::debug_handler]
pub async fn list_notifications(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Query(query): Query<NotificationListQuery>,
) -> Result<Json<Value>, AppError> {
    let service = NotificationService::new(&state);

    let page = service
        .list(query.unread.unwrap_or(false), auth.token())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    let unread = page.items.iter().filter(|n| !n.is_read).count();

    Ok(Json(json!({
        "notifications": page.items,
        "total": page.total,
        "unread": unread
    })))
}

#[axum::debug_handler]
pub async fn mark_notification_read(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
    Path(notification_id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let service = NotificationService::new(&state);

    let notification = service
        .mark_as_read(&notification_id, auth.token())
        .await
        .map_err(|_| AppError::NotFound("Notification not found".to_string()))?;

    Ok(Json(json!(notification)))
}

#[axum::debug_handler]
pub async fn mark_all_notifications_read(
    State(state): State<Arc<AppConfig>>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> Result<Json<Value>, AppError> {
    let service = NotificationService::new(&state);

    let updated = service
        .mark_all_as_read(auth.token())
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(json!({ "updated": updated })))
}
