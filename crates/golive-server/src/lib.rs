pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use golive_core::clock::Clock;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the axum Router against the system clock.
pub fn build_router(root: PathBuf) -> Router {
    build_router_with_state(state::AppState::new(root))
}

/// Build the axum Router with an injected clock. Used by tests to freeze "now".
pub fn build_router_with_clock(root: PathBuf, clock: Arc<dyn Clock>) -> Router {
    build_router_with_state(state::AppState::with_clock(root, clock))
}

fn build_router_with_state(app_state: state::AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Predictions
        .route(
            "/api/predictions/deadlines",
            get(routes::predictions::deadline_predictions),
        )
        // Engagements
        .route("/api/engagements", get(routes::engagements::list_engagements))
        .route(
            "/api/engagements/{id}",
            get(routes::engagements::get_engagement),
        )
        .route(
            "/api/engagements/{id}/prediction",
            get(routes::engagements::engagement_prediction),
        )
        // Config
        .route("/api/config", get(routes::config::get_config))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// Start the prediction API server.
pub async fn serve(root: PathBuf, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    serve_on(root, listener).await
}

/// Start the prediction API server on a pre-bound listener.
///
/// Unlike `serve`, this accepts a `TcpListener` that was already bound so the
/// caller can read the actual port before starting (useful when `port = 0` and
/// the OS picks a free port).
pub async fn serve_on(root: PathBuf, listener: tokio::net::TcpListener) -> anyhow::Result<()> {
    let actual_port = listener.local_addr()?.port();
    let app = build_router(root);

    tracing::info!("golive API listening on http://localhost:{actual_port}");

    axum::serve(listener, app).await?;
    Ok(())
}
