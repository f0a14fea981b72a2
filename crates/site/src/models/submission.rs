//! Contact submission models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ridgeline_core::{Email, SubmissionId};

/// A stored contact-form submission.
///
/// `status` is free-form text; the dashboard suggests values but the server
/// accepts any string.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated submission ready to be inserted.
///
/// Fields are stored exactly as submitted; validation trims only for the
/// emptiness checks and performs no normalization.
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub name: String,
    pub email: Email,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
}
