use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers::{self, DirectoryState};

pub fn vet_directory_routes(config: Arc<AppConfig>) -> Router {
    let state = Arc::new(DirectoryState::new(config));

    Router::new()
        .route("/search", get(handlers::search_veterinarians))
        .route("/{vet_id}", get(handlers::get_veterinarian))
        .with_state(state)
}
