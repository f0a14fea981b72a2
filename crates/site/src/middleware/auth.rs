//! Authentication middleware and extractors.
//!
//! Provides extractors for requiring an authenticated admin in route
//! handlers. Unauthenticated access redirects to the login page rather
//! than erroring.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::Redirect,
};
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// Extractor that requires an authenticated admin.
///
/// If no admin is logged in, the request is redirected to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdmin(admin): RequireAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
pub struct RequireAdmin(pub CurrentAdmin);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = Redirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or_else(|| Redirect::to("/admin/login"))?;

        let admin: CurrentAdmin = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten()
            .ok_or_else(|| Redirect::to("/admin/login"))?;

        Ok(Self(admin))
    }
}

/// Read the current admin from the session, if any.
pub async fn current_admin(session: &Session) -> Option<CurrentAdmin> {
    session
        .get(session_keys::CURRENT_ADMIN)
        .await
        .ok()
        .flatten()
}

/// Helper to set the current admin in the session (login).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_admin(
    session: &Session,
    admin: &CurrentAdmin,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_ADMIN, admin).await
}

/// Destroy the session record and clear its cookie (logout).
///
/// # Errors
///
/// Returns an error if the store cannot delete the session.
pub async fn clear_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
