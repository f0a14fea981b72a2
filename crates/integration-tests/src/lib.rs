//! Shared helpers for integration tests.
//!
//! These tests exercise a running site over HTTP and observe side effects
//! directly in the database. They require:
//! - A running `PostgreSQL` database (`DATABASE_URL`)
//! - The site running against it (`cargo run -p ridgeline-site`)
//!
//! Each test is `#[ignore]`d so the workspace test suite stays green
//! without live services; run them with `cargo test -- --ignored`.

#![cfg_attr(not(test), forbid(unsafe_code))]

use reqwest::Client;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Base URL for the site (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// HTTP client with a cookie store and no redirect following, so tests can
/// assert on the redirects the admin surface issues.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// Connect to the database the site under test is using.
///
/// # Panics
///
/// Panics if `DATABASE_URL` is unset or the connection fails.
pub async fn db_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database")
}
