//! Notification log repository for database operations.
//!
//! The log table is append-only: the fan-out task writes one row per
//! attempted channel per submission and nothing ever updates them.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use ridgeline_core::{DeliveryStatus, NotificationChannel, NotificationLogId, SubmissionId};

use super::RepositoryError;
use crate::models::NotificationLogEntry;

/// Internal row type for `PostgreSQL` notification log queries.
#[derive(Debug, sqlx::FromRow)]
struct NotificationLogRow {
    id: i32,
    submission_id: i32,
    channel: String,
    status: String,
    details: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<NotificationLogRow> for NotificationLogEntry {
    type Error = RepositoryError;

    fn try_from(row: NotificationLogRow) -> Result<Self, Self::Error> {
        let channel: NotificationChannel = row.channel.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid channel in database: {e}"))
        })?;
        let status: DeliveryStatus = row.status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Self {
            id: NotificationLogId::new(row.id),
            submission_id: SubmissionId::new(row.submission_id),
            channel,
            status,
            details: row.details,
            created_at: row.created_at,
        })
    }
}

/// Repository for notification log database operations.
pub struct NotificationLogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NotificationLogRepository<'a> {
    /// Create a new notification log repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Append one notification attempt outcome.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        submission_id: SubmissionId,
        channel: NotificationChannel,
        status: DeliveryStatus,
        details: &str,
    ) -> Result<NotificationLogEntry, RepositoryError> {
        let row = sqlx::query_as::<_, NotificationLogRow>(
            "INSERT INTO notification_logs (submission_id, channel, status, details) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, submission_id, channel, status, details, created_at",
        )
        .bind(submission_id)
        .bind(channel.as_str())
        .bind(status.as_str())
        .bind(details)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// List a submission's notification attempts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_for_submission(
        &self,
        submission_id: SubmissionId,
    ) -> Result<Vec<NotificationLogEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, NotificationLogRow>(
            "SELECT id, submission_id, channel, status, details, created_at \
             FROM notification_logs WHERE submission_id = $1 \
             ORDER BY created_at DESC",
        )
        .bind(submission_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}
