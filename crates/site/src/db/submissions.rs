//! Submission repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use ridgeline_core::{Email, SubmissionId};

use super::RepositoryError;
use crate::models::{NewSubmission, Submission};

/// Internal row type for `PostgreSQL` submission queries.
///
/// Queries are bound at runtime because the schema only exists after startup
/// initialization.
#[derive(Debug, sqlx::FromRow)]
struct SubmissionRow {
    id: i32,
    name: String,
    email: String,
    phone: Option<String>,
    company: Option<String>,
    message: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubmissionRow> for Submission {
    type Error = RepositoryError;

    fn try_from(row: SubmissionRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: SubmissionId::new(row.id),
            name: row.name,
            email,
            phone: row.phone,
            company: row.company,
            message: row.message,
            status: row.status,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SUBMISSION_COLUMNS: &str = "id, name, email, phone, company, message, status, created_at, updated_at";

/// Repository for submission database operations.
pub struct SubmissionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SubmissionRepository<'a> {
    /// Create a new submission repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new submission with status `"new"`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewSubmission) -> Result<Submission, RepositoryError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "INSERT INTO contact_submissions (name, email, phone, company, message) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {SUBMISSION_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.phone)
        .bind(&new.company)
        .bind(&new.message)
        .fetch_one(self.pool)
        .await?;

        row.try_into()
    }

    /// List all submissions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a row is invalid.
    pub async fn list_all(&self) -> Result<Vec<Submission>, RepositoryError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM contact_submissions ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a submission by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: SubmissionId) -> Result<Option<Submission>, RepositoryError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {SUBMISSION_COLUMNS} FROM contact_submissions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Set a submission's status and bump its `updated_at`.
    ///
    /// Any string is accepted; a nonexistent ID is not an error (last write
    /// wins, nothing to write to).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update_status(
        &self,
        id: SubmissionId,
        status: &str,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE contact_submissions SET status = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(status)
        .bind(id)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Delete a submission and its notification log rows.
    ///
    /// Log rows must go first; they reference the submission. The two
    /// statements run sequentially without a transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if either delete fails.
    pub async fn delete(&self, id: SubmissionId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM notification_logs WHERE submission_id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        sqlx::query("DELETE FROM contact_submissions WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}
