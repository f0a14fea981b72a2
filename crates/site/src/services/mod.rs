//! Services: authentication, notification senders, and the fan-out task.

pub mod auth;
pub mod email;
pub mod notify;
pub mod whatsapp;

use chrono::{DateTime, Utc};

pub use auth::{AuthError, AuthService, MIN_PASSWORD_LENGTH};
pub use email::{EmailError, EmailSender};
pub use notify::spawn_notifications;
pub use whatsapp::{WhatsAppError, WhatsAppSender};

use crate::models::Submission;
use crate::state::AppState;

/// Submission data handed to the notification senders.
///
/// Owned copy so the detached fan-out task outlives the request.
#[derive(Debug, Clone)]
pub struct NotificationPayload {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

impl From<&Submission> for NotificationPayload {
    fn from(submission: &Submission) -> Self {
        Self {
            name: submission.name.clone(),
            email: submission.email.to_string(),
            phone: submission.phone.clone(),
            company: submission.company.clone(),
            message: submission.message.clone(),
            submitted_at: submission.created_at,
        }
    }
}

/// Result of one delivery attempt.
///
/// `Skipped` is what an unconfigured sender returns; the fan-out treats it
/// the same as a transport error when writing the log row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The transport accepted the message; `reference` is its identifier
    /// (SMTP reply code, Twilio message SID).
    Sent { reference: String },
    /// No attempt was made because the sender is unconfigured.
    Skipped { reason: &'static str },
}

/// Result of a sender's connectivity self-check.
///
/// Operational diagnostics only; the send path never consults this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionCheck {
    Unconfigured,
    Connected,
    Failed(String),
}

/// Run both senders' connectivity self-checks and log the results.
pub async fn log_connectivity(state: AppState) {
    let (email, whatsapp) = tokio::join!(
        state.email().verify_connection(),
        state.whatsapp().verify_connection()
    );

    for (channel, check) in [("email", email), ("whatsapp", whatsapp)] {
        match check {
            ConnectionCheck::Unconfigured => {
                tracing::info!(channel, "notifications not configured");
            }
            ConnectionCheck::Connected => {
                tracing::info!(channel, "notification transport reachable");
            }
            ConnectionCheck::Failed(error) => {
                tracing::warn!(channel, %error, "notification transport unreachable");
            }
        }
    }
}
