//! Contact form route handlers.
//!
//! The intake path: validate, insert one row, answer 201, then hand the
//! submission to the detached notification fan-out. The response never
//! waits on delivery.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use ridgeline_core::Email;

use crate::db::SubmissionRepository;
use crate::error::{AppError, Result};
use crate::models::NewSubmission;
use crate::services::{NotificationPayload, spawn_notifications};
use crate::state::AppState;

/// Contact form data.
///
/// Required fields default to empty so an omitted field reaches the
/// validation path and gets the 400 JSON body instead of a decode error.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: String,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<i32>,
}

/// Submit the contact form.
///
/// POST /api/contact
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> Result<(StatusCode, Json<ContactResponse>)> {
    let new = validate(form)?;

    let repo = SubmissionRepository::new(state.pool());
    let submission = repo.create(&new).await?;

    tracing::info!(submission_id = %submission.id, "contact submission stored");

    // Fire and forget: outcomes land in notification_logs only.
    spawn_notifications(
        state.clone(),
        submission.id,
        NotificationPayload::from(&submission),
    );

    Ok((
        StatusCode::CREATED,
        Json(ContactResponse {
            success: true,
            message: "Thank you for your message! We will get back to you soon.".to_string(),
            submission_id: Some(submission.id.as_i32()),
        }),
    ))
}

/// Validate the form into an insertable submission.
///
/// Required fields must be non-empty after trimming and the email must have
/// the `local@domain.tld` shape. Values are stored exactly as submitted;
/// empty optional fields become NULL.
fn validate(form: ContactForm) -> std::result::Result<NewSubmission, AppError> {
    if form.name.trim().is_empty()
        || form.email.trim().is_empty()
        || form.message.trim().is_empty()
    {
        return Err(AppError::Validation(
            "Name, email, and message are required".to_string(),
        ));
    }

    let email = Email::parse(&form.email).map_err(|_| {
        AppError::Validation("Please provide a valid email address".to_string())
    })?;

    Ok(NewSubmission {
        name: form.name,
        email,
        phone: form.phone.filter(|p| !p.trim().is_empty()),
        company: form.company.filter(|c| !c.trim().is_empty()),
        message: form.message,
    })
}
