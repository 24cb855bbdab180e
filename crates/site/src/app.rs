//! Application router assembly.
//!
//! Shared by `main` and the integration tests so the tested router is the
//! served router.

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::middleware;
use crate::routes;
use crate::state::AppState;

/// Build the complete application router: health check, public pages,
/// admin panel, static assets, and the session layer.
pub fn build_router(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/site/static"))
        .layer(session_layer)
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}
