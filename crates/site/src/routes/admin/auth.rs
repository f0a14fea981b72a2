//! Admin login and logout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::filters;
use crate::middleware::{clear_session, current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
}

/// Display the login page.
///
/// GET /admin/login
pub async fn login_page(session: Session) -> Response {
    if current_admin(&session).await.is_some() {
        return Redirect::to("/admin").into_response();
    }

    LoginTemplate { error: None }.into_response()
}

/// Handle login form submission.
///
/// POST /admin/login
///
/// Failures re-render the form with a generic message that does not say
/// which field was wrong.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Response {
    let auth = AuthService::new(state.pool());

    match auth.login(&form.username, &form.password).await {
        Ok(user) => {
            let admin = CurrentAdmin {
                id: user.id,
                username: user.username,
            };

            if let Err(e) = set_current_admin(&session, &admin).await {
                tracing::error!(error = %e, "failed to store login session");
                return LoginTemplate {
                    error: Some("An error occurred. Please try again.".to_string()),
                }
                .into_response();
            }

            tracing::info!(admin_id = %admin.id, "admin logged in");
            Redirect::to("/admin").into_response()
        }
        Err(AuthError::InvalidCredentials) => LoginTemplate {
            error: Some("Invalid username or password".to_string()),
        }
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "login failed");
            LoginTemplate {
                error: Some("An error occurred. Please try again.".to_string()),
            }
            .into_response()
        }
    }
}

/// Destroy the session and return to the login page.
///
/// GET /admin/logout
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_session(&session).await {
        tracing::error!(error = %e, "failed to destroy session");
    }

    Redirect::to("/admin/login")
}
