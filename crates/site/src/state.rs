//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::SiteConfig;
use crate::services::{EmailSender, WhatsAppSender};

/// Error resolving the notification senders at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("smtp transport: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Both notification senders are resolved here
/// once, at startup; handlers never construct transports.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    pool: PgPool,
    email: EmailSender,
    whatsapp: WhatsAppSender,
}

impl AppState {
    /// Create a new application state, resolving both senders from
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured transport cannot be constructed.
    pub fn new(config: SiteConfig, pool: PgPool) -> Result<Self, StateError> {
        let email =
            EmailSender::from_config(config.smtp.as_ref(), config.notification_email.as_deref())?;
        let whatsapp = WhatsAppSender::from_config(config.twilio.as_ref())?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                email,
                whatsapp,
            }),
        })
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the email sender.
    #[must_use]
    pub fn email(&self) -> &EmailSender {
        &self.inner.email
    }

    /// Get a reference to the WhatsApp sender.
    #[must_use]
    pub fn whatsapp(&self) -> &WhatsAppSender {
        &self.inner.whatsapp
    }
}
