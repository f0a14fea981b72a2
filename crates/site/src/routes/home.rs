//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
struct HomeTemplate;

/// Render the marketing home page.
pub async fn home() -> impl IntoResponse {
    HomeTemplate
}
