//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                            - Home page
//! GET  /health                      - Liveness check (in main)
//! GET  /health/ready                - Readiness check (in main)
//!
//! # Contact API
//! POST /api/contact                 - Submit the contact form (JSON)
//!
//! # Admin
//! GET  /admin/login                 - Login page
//! POST /admin/login                 - Login action (form)
//! GET  /admin/logout                - Logout action
//! GET  /admin                       - Dashboard: submission list
//! GET  /admin/submission/{id}       - Submission detail + notification log
//! POST /admin/submission/{id}/status - Update submission status (JSON)
//! DELETE /admin/submission/{id}     - Delete submission and its logs (JSON)
//! GET  /admin/setup                 - One-time setup page
//! POST /admin/setup                 - Create the first admin (form)
//! ```

pub mod admin;
pub mod contact;
pub mod home;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::filters;
use crate::state::AppState;

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "404.html")]
struct NotFoundTemplate;

/// Render the not-found page for unmatched routes.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, NotFoundTemplate)
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Contact API
        .route("/api/contact", post(contact::submit))
        // Admin dashboard
        .nest("/admin", admin::router())
}
