//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (featured projects)
//! GET  /health                 - Health check
//! GET  /services               - Service offerings
//! GET  /blog                   - Blog index (published posts)
//! GET  /blog/{id}              - Blog post detail
//! GET  /contact                - Contact form
//! POST /contact                - Contact form submission
//!
//! # Admin (session-authenticated, /admin/*)
//! GET  /admin                  - Dashboard
//! GET  /admin/login            - Login page
//! POST /admin/login            - Login action
//! POST /admin/logout           - Logout action
//!
//! GET  /admin/posts            - Blog post list
//! GET  /admin/posts/new        - New post form
//! POST /admin/posts            - Create post
//! GET  /admin/posts/{id}/edit  - Edit post form
//! POST /admin/posts/{id}       - Update post
//! POST /admin/posts/{id}/delete - Delete post
//!
//! GET  /admin/services         - Service list
//! GET  /admin/services/new     - New service form
//! POST /admin/services         - Create service
//! GET  /admin/services/{id}/edit - Edit service form
//! POST /admin/services/{id}    - Update service
//! POST /admin/services/{id}/delete - Delete service
//! POST /admin/services/{id}/move - Move service up/down
//!
//! GET  /admin/projects         - Project list
//! GET  /admin/projects/new     - New project form
//! POST /admin/projects         - Create project
//! GET  /admin/projects/{id}/edit - Edit project form
//! POST /admin/projects/{id}   - Update project
//! POST /admin/projects/{id}/delete - Delete project
//! POST /admin/projects/{id}/feature - Toggle featured flag
//!
//! GET  /admin/messages         - Contact inbox
//! POST /admin/messages/{id}/status - Mark message read/replied
//! POST /admin/messages/{id}/delete - Delete message
//! ```

pub mod admin;
pub mod blog;
pub mod contact;
pub mod home;
pub mod services;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the full application router (public pages plus the admin panel).
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/services", get(services::index))
        .route("/blog", get(blog::index))
        .route("/blog/{id}", get(blog::show))
        .route("/contact", get(contact::page).post(contact::submit))
        .nest("/admin", admin::routes())
}
