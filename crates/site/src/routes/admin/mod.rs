//! Admin dashboard routes.
//!
//! Everything except login and setup requires an authenticated session;
//! unauthenticated requests are redirected to the login page.

pub mod auth;
pub mod dashboard;
pub mod setup;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Build the admin router, nested at `/admin`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/", get(dashboard::index))
        .route(
            "/submission/{id}",
            get(dashboard::show).delete(dashboard::destroy),
        )
        .route("/submission/{id}/status", post(dashboard::update_status))
        .route("/setup", get(setup::setup_page).post(setup::create_admin))
}
