use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers;

pub fn consultation_routes(state: Arc<AppConfig>) -> Router {
    Router::new()
        .route("/", get(handlers::list_consultations))
        .route("/patients", get(handlers::get_my_patients))
        .route("/patients/{patient_id}", get(handlers::get_patient_detail))
        .route("/patients/{patient_id}/notes", post(handlers::add_patient_note))
        .route(
            "/patients/{patient_id}/complete",
            post(handlers::mark_patient_completed),
        )
        .with_state(state)
}
