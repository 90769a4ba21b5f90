use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;

use crate::handlers::{self, EmergencyState};

pub fn emergency_routes(config: Arc<AppConfig>) -> Router {
    let state = Arc::new(EmergencyState::new(config));

    Router::new()
        .route("/book", post(handlers::book_emergency_consultation))
        .route("/cases", get(handlers::list_emergency_cases))
        .route("/cases/{case_id}/progress", get(handlers::get_case_progress))
        .route(
            "/cases/{case_id}/track",
            post(handlers::start_case_tracking)
                .get(handlers::get_tracked_progress)
                .delete(handlers::stop_case_tracking),
        )
        .with_state(state)
}
