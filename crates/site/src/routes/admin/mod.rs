//! Admin panel route handlers.
//!
//! Every handler except login takes the [`RequireAdminAuth`] extractor,
//! which carries the bearer token for owner-only backend operations.
//! List screens always fetch fresh from the backend; mutations invalidate
//! the public read cache for the affected entity.
//!
//! [`RequireAdminAuth`]: crate::middleware::RequireAdminAuth

pub mod auth;
pub mod dashboard;
pub mod forms;
pub mod messages;
pub mod posts;
pub mod projects;
pub mod services;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the admin panel router, mounted under `/admin`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        // Blog posts
        .route("/posts", get(posts::index).post(posts::create))
        .route("/posts/new", get(posts::new_page))
        .route("/posts/{id}/edit", get(posts::edit_page))
        .route("/posts/{id}", post(posts::update))
        .route("/posts/{id}/delete", post(posts::delete))
        // Services
        .route("/services", get(services::index).post(services::create))
        .route("/services/new", get(services::new_page))
        .route("/services/{id}/edit", get(services::edit_page))
        .route("/services/{id}", post(services::update))
        .route("/services/{id}/delete", post(services::delete))
        .route("/services/{id}/move", post(services::move_service))
        // Projects
        .route("/projects", get(projects::index).post(projects::create))
        .route("/projects/new", get(projects::new_page))
        .route("/projects/{id}/edit", get(projects::edit_page))
        .route("/projects/{id}", post(projects::update))
        .route("/projects/{id}/delete", post(projects::delete))
        .route("/projects/{id}/feature", post(projects::toggle_featured))
        // Contact inbox
        .route("/messages", get(messages::index))
        .route("/messages/{id}/status", post(messages::set_status))
        .route("/messages/{id}/delete", post(messages::delete))
}
