//! Router configuration for the preview server.

use axum::{routing::get, Router};

use super::handlers;
use super::AppState;

/// Create the preview router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/*path", get(handlers::site_path))
        .with_state(state)
}
