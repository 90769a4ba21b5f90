use std::net::SocketAddr;
use std::sync::Arc;
use dotenv::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{self, TraceLayer};
use tracing::{Level, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod router;

use shared_config::AppConfig;
use shared_session::{FileBackend, MemoryBackend, SessionBackend, SessionStore};

#[tokio::main]
async fn main() {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cattle Health gateway");

    // Load configuration
    let config = AppConfig::from_env();

    // Session storage: file-backed when configured, in-memory otherwise
    let backend: Box<dyn SessionBackend> = match &config.session_file {
        Some(path) => match FileBackend::open(path) {
            Ok(backend) => Box::new(backend),
            Err(err) => {
                warn!("Cannot open session file {} ({}), using in-memory store", path, err);
                Box::new(MemoryBackend::new())
            }
        },
        None => Box::new(MemoryBackend::new()),
    };

    let session = Arc::new(SessionStore::new(backend));
    match session.init() {
        Ok(Some(restored)) => info!("Session restored for user {}", restored.user.id),
        Ok(None) => info!("No stored session, starting logged out"),
        Err(err) => warn!("Session restore failed: {}", err),
    }

    // Log session lifecycle transitions
    let mut session_rx = session.subscribe();
    tokio::spawn(async move {
        while session_rx.changed().await.is_ok() {
            match session_rx.borrow().as_ref() {
                Some(s) => info!("Session active: user {} ({:?})", s.user.id, s.user.role),
                None => info!("Session ended"),
            }
        }
    });

    // Set up CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Create shared state
    let state = Arc::new(config);

    // Build the application router
    let app = router::create_router(state, session)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new()
                    .level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new()
                    .level(Level::INFO)),
        )
        .layer(cors);

    // Run the server
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app)
        .await
        .unwrap();
}
