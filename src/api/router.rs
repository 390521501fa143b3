use std::path::Path;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use super::auth;
use super::health;
use super::state::AppState;
use super::v1;

/// Create the full router with application state.
///
/// `media_dir` is the directory stored student photos are served from under
/// `/media`.
pub fn create_router_with_state(state: AppState, media_dir: impl AsRef<Path>) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Authentication endpoints (login itself needs no token)
        .nest("/auth", auth::create_auth_router())
        // Roster and draw API
        .nest("/v1", v1::create_v1_router())
        // Stored student photos
        .nest_service("/media", ServeDir::new(media_dir))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
