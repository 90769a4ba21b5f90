use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use shared_config::AppConfig;
use shared_session::SessionStore;

use crate::handlers::{self, AuthState};

pub fn auth_routes(config: Arc<AppConfig>, session: Arc<SessionStore>) -> Router {
    let state = Arc::new(AuthState { config, session });

    Router::new()
        .route("/login", post(handlers::login))
        .route("/logout", post(handlers::logout))
        .route("/session", get(handlers::get_session))
        .with_state(state)
}
