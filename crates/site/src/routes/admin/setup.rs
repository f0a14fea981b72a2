//! One-time admin setup route handlers.
//!
//! Creates the first administrator, and only the first: once any admin
//! exists both routes redirect to the login page. The zero-admins check and
//! the insert are separate statements; concurrent setup requests can race
//! through the window. That race is documented behavior, not mitigated.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::filters;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Setup form data.
#[derive(Debug, Deserialize)]
pub struct SetupForm {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Setup page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/setup.html")]
pub struct SetupTemplate {
    pub error: Option<String>,
}

/// Display the setup page while no admin exists.
///
/// GET /admin/setup
pub async fn setup_page(State(state): State<AppState>) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.admin_exists().await {
        Ok(true) => Redirect::to("/admin/login").into_response(),
        Ok(false) => SetupTemplate { error: None }.into_response(),
        Err(e) => {
            tracing::error!(error = %e, "setup availability check failed");
            SetupTemplate {
                error: Some("Database not ready. Please try again.".to_string()),
            }
            .into_response()
        }
    }
}

/// Create the first admin user.
///
/// POST /admin/setup
pub async fn create_admin(
    State(state): State<AppState>,
    Form(form): Form<SetupForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth
        .create_first_admin(&form.username, &form.password, form.email.as_deref())
        .await
    {
        Ok(admin) => {
            tracing::info!(admin_id = %admin.id, username = %admin.username, "first admin created");
            Redirect::to("/admin/login").into_response()
        }
        Err(AuthError::SetupClosed) => Redirect::to("/admin/login").into_response(),
        Err(AuthError::MissingCredentials) => SetupTemplate {
            error: Some("Username and password are required".to_string()),
        }
        .into_response(),
        Err(AuthError::WeakPassword(message)) => SetupTemplate {
            error: Some(message),
        }
        .into_response(),
        Err(AuthError::InvalidEmail(_)) => SetupTemplate {
            error: Some("Please provide a valid email address".to_string()),
        }
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to create admin user");
            SetupTemplate {
                error: Some("Failed to create admin user".to_string()),
            }
            .into_response()
        }
    }
}
