//! Database operations for the site's `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `contact_submissions` - Inbound contact-form submissions
//! - `notification_logs` - One row per notification attempt per submission
//! - `admin_users` - Dashboard administrator credentials
//! - `tower_sessions.session` - Session storage (created by the session store)
//!
//! The schema is created idempotently at startup by [`init_schema`]; there
//! is no separate migration step.

pub mod admin_users;
pub mod notification_logs;
pub mod submissions;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use thiserror::Error;

pub use admin_users::AdminUserRepository;
pub use notification_logs::NotificationLogRepository;
pub use submissions::SubmissionRepository;

use crate::config::DatabaseConfig;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique username).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// With `tls` set, the connection is encrypted but the server certificate is
/// not verified (managed-hosting style TLS).
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let mut options = PgConnectOptions::from_str(config.url.expose_secret())?;
    if config.tls {
        options = options.ssl_mode(PgSslMode::Require);
    }

    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

const CREATE_CONTACT_SUBMISSIONS: &str = r"
    CREATE TABLE IF NOT EXISTS contact_submissions (
        id SERIAL PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        email VARCHAR(255) NOT NULL,
        phone VARCHAR(50),
        company VARCHAR(255),
        message TEXT NOT NULL,
        status VARCHAR(50) NOT NULL DEFAULT 'new',
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
";

const CREATE_ADMIN_USERS: &str = r"
    CREATE TABLE IF NOT EXISTS admin_users (
        id SERIAL PRIMARY KEY,
        username VARCHAR(100) UNIQUE NOT NULL,
        password_hash VARCHAR(255) NOT NULL,
        email VARCHAR(255),
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
";

const CREATE_NOTIFICATION_LOGS: &str = r"
    CREATE TABLE IF NOT EXISTS notification_logs (
        id SERIAL PRIMARY KEY,
        submission_id INTEGER NOT NULL REFERENCES contact_submissions(id),
        channel VARCHAR(50) NOT NULL,
        status VARCHAR(50) NOT NULL,
        details TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
";

/// Create the application tables if they do not exist.
///
/// Holds a single pooled connection across the statements; the connection is
/// released when it drops, whether or not a statement fails.
///
/// # Errors
///
/// Returns `sqlx::Error` if a statement fails.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut conn = pool.acquire().await?;

    sqlx::query(CREATE_CONTACT_SUBMISSIONS)
        .execute(&mut *conn)
        .await?;
    sqlx::query(CREATE_ADMIN_USERS).execute(&mut *conn).await?;
    sqlx::query(CREATE_NOTIFICATION_LOGS)
        .execute(&mut *conn)
        .await?;

    tracing::info!("database schema verified");
    Ok(())
}
