use std::sync::Arc;

use axum::{
    Router,
    routing::get,
};

use auth_cell::router::auth_routes;
use consultation_cell::router::consultation_routes;
use dashboard_cell::router::dashboard_routes;
use emergency_cell::router::emergency_routes;
use notification_cell::router::notification_routes;
use shared_config::AppConfig;
use shared_session::SessionStore;
use vet_directory_cell::router::vet_directory_routes;

pub fn create_router(state: Arc<AppConfig>, session: Arc<SessionStore>) -> Router {
    Router::new()
        .route("/", get(|| async { "Cattle Health gateway is running!" }))
        .nest("/auth", auth_routes(state.clone(), session))
        .nest("/veterinarians", vet_directory_routes(state.clone()))
        .nest("/emergency", emergency_routes(state.clone()))
        .nest("/consultations", consultation_routes(state.clone()))
        .nest("/notifications", notification_routes(state.clone()))
        .nest("/dashboard", dashboard_routes(state.clone()))
}
