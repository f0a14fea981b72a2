//! Notification log models.

use chrono::{DateTime, Utc};
use serde::Serialize;

use ridgeline_core::{DeliveryStatus, NotificationChannel, NotificationLogId, SubmissionId};

/// One recorded notification attempt for a submission.
///
/// Append-only: rows are written once by the fan-out task and never mutated.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationLogEntry {
    pub id: NotificationLogId,
    pub submission_id: SubmissionId,
    pub channel: NotificationChannel,
    pub status: DeliveryStatus,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}
