//! Unified error handling for JSON endpoints.
//!
//! Handlers that answer in JSON return `Result<T, AppError>`. Validation
//! failures surface their message verbatim; anything touching the store
//! returns a generic message with the detail traced server-side only.
//! The HTML admin pages handle their errors inline (re-rendered forms,
//! redirects) rather than through this type.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;

/// Application-level error type for JSON endpoints.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request failed validation; the message is shown to the caller.
    #[error("{0}")]
    Validation(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),
}

/// JSON error body: `{"success": false, "message": "..."}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(message) => (StatusCode::BAD_REQUEST, message),
            Self::Database(ref e) => {
                tracing::error!(error = %e, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                message,
            }),
        )
            .into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        assert_eq!(
            get_status(AppError::Validation("missing name".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_database_maps_to_internal_error() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        let err = AppError::Validation("Name, email, and message are required".to_string());
        assert_eq!(err.to_string(), "Name, email, and message are required");
    }
}
