use std::sync::Arc;

use axum::{extract::State, Json};
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_gateway::BackendClient;
use shared_models::auth::{LoginRequest, LoginResponse, TokenPair};
use shared_models::error::AppError;
use shared_session::SessionStore;

pub struct AuthState {
    pub config: Arc<AppConfig>,
    pub session: Arc<SessionStore>,
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<Arc<AuthState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<Value>, AppError> {
    debug!("Logging in {}", request.email);

    let client = BackendClient::new(&state.config);

    let response: LoginResponse = client
        .request(
            Method::POST,
            "/api/users/login/",
            None,
            Some(json!({
                "email": request.email,
                "password": request.password,
            })),
        )
        .await
        .map_err(|e| AppError::Auth(e.to_string()))?;

    let tokens = TokenPair {
        access: response.access,
        refresh: response.refresh,
    };

    let session = state
        .session
        .set(tokens, response.user)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({
        "user": session.user,
        "logged_in": true
    })))
}

#[axum::debug_handler]
pub async fn logout(State(state): State<Arc<AuthState>>) -> Result<Json<Value>, AppError> {
    state
        .session
        .clear()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(json!({ "logged_in": false })))
}

#[axum::debug_handler]
pub async fn get_session(State(state): State<Arc<AuthState>>) -> Json<Value> {
    match state.session.current() {
        Some(session) => Json(json!({
            "logged_in": true,
            "user": session.user
        })),
        None => Json(json!({ "logged_in": false })),
    }
}
