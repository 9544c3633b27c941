// HTTP front end serving the generated report
pub mod routes;
pub mod state;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

use crate::config::AppConfig;
pub use state::{AppState, spawn_generation_worker};

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.config.static_dir());

    Router::new()
        .route("/", get(routes::index))
        .route("/report", get(routes::index))
        .route("/data", get(routes::data))
        .route("/generate", get(routes::generate))
        .route("/status", get(routes::status))
        .route("/health", get(routes::health))
        .route("/visualizations/{file}", get(routes::visualization))
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Run the web server and its generation worker. A generation is queued at
/// startup when no HTML report exists yet.
pub async fn run_server(config: Arc<AppConfig>) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config.clone());

    spawn_generation_worker(state.clone());
    if !tokio::fs::try_exists(config.html_report_path()).await.unwrap_or(false) {
        info!("No report found, generating initial report in background");
        state.request_generation();
    }

    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚗⚡ Web server listening on http://{}", addr);

    axum::serve(listener, app).await
}
