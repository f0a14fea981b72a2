//! Site configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SITE_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `SESSION_SECRET` - Session signing secret (min 32 chars)
//!
//! ## Optional
//! - `HOST` - Bind address (default: 0.0.0.0)
//! - `PORT` - Listen port (default: 3000)
//! - `BASE_URL` - Public URL for the site (default: <http://localhost:3000>)
//! - `DATABASE_TLS` - Set to `true` to require TLS on the database connection
//!
//! ## Email notifications (all-or-nothing; absent means email is skipped)
//! - `SMTP_HOST`, `SMTP_PORT` (default 587), `SMTP_SECURE` (implicit TLS when
//!   `true`, STARTTLS otherwise), `SMTP_USER`, `SMTP_PASS`, `SMTP_FROM`
//!   (default: `SMTP_USER`)
//! - `NOTIFICATION_EMAIL` - Address that receives contact notifications
//!
//! ## WhatsApp notifications (all-or-nothing; absent means WhatsApp is skipped)
//! - `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`
//! - `TWILIO_WHATSAPP_FROM` (format: `whatsapp:+14155238886`)
//! - `WHATSAPP_NOTIFICATION_TO` (format: `whatsapp:+1234567890`)

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_SESSION_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Site application configuration.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Database connection settings
    pub database: DatabaseConfig,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Session signing secret
    pub session_secret: SecretString,
    /// SMTP transport settings, when email notifications are configured
    pub smtp: Option<SmtpConfig>,
    /// Address that receives contact-form notification emails
    pub notification_email: Option<String>,
    /// Twilio settings, when WhatsApp notifications are configured
    pub twilio: Option<TwilioConfig>,
}

/// Database connection settings.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection URL (contains password)
    pub url: SecretString,
    /// Require TLS on the connection (encrypted, certificates not verified)
    pub tls: bool,
}

/// SMTP transport configuration.
///
/// Implements `Debug` manually to redact the password.
#[derive(Clone)]
pub struct SmtpConfig {
    /// SMTP server hostname
    pub host: String,
    /// SMTP server port (usually 587 or 465)
    pub port: u16,
    /// Use implicit TLS instead of STARTTLS
    pub secure: bool,
    /// SMTP username
    pub username: String,
    /// SMTP password or app password
    pub password: SecretString,
    /// From address for outgoing mail
    pub from: String,
}

impl std::fmt::Debug for SmtpConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("secure", &self.secure)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("from", &self.from)
            .finish()
    }
}

/// Twilio WhatsApp configuration.
///
/// Implements `Debug` manually to redact the auth token.
#[derive(Clone)]
pub struct TwilioConfig {
    /// Twilio account SID
    pub account_sid: String,
    /// Twilio auth token
    pub auth_token: SecretString,
    /// Sending WhatsApp address (`whatsapp:+...`)
    pub whatsapp_from: String,
    /// Receiving WhatsApp address (`whatsapp:+...`)
    pub whatsapp_to: String,
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"[REDACTED]")
            .field("whatsapp_from", &self.whatsapp_from)
            .field("whatsapp_to", &self.whatsapp_to)
            .finish()
    }
}

impl SiteConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database = DatabaseConfig {
            url: get_database_url("SITE_DATABASE_URL")?,
            tls: get_env_flag("DATABASE_TLS"),
        };
        let host = get_env_or_default("HOST", "0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("BASE_URL", "http://localhost:3000");
        let session_secret = get_required_secret("SESSION_SECRET")?;
        validate_session_secret(&session_secret, "SESSION_SECRET")?;

        let smtp = SmtpConfig::from_env()?;
        let notification_email = get_optional_env("NOTIFICATION_EMAIL");
        let twilio = TwilioConfig::from_env();

        Ok(Self {
            database,
            host,
            port,
            base_url,
            session_secret,
            smtp,
            notification_email,
            twilio,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl SmtpConfig {
    /// A partial SMTP configuration is treated as absent; the email sender
    /// then reports every attempt as skipped instead of failing at startup.
    fn from_env() -> Result<Option<Self>, ConfigError> {
        let Some(host) = get_optional_env("SMTP_HOST") else {
            return Ok(None);
        };
        let (Some(username), Some(password)) =
            (get_optional_env("SMTP_USER"), get_optional_env("SMTP_PASS"))
        else {
            return Ok(None);
        };

        let port = get_env_or_default("SMTP_PORT", "587")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("SMTP_PORT".to_string(), e.to_string()))?;
        let from = get_optional_env("SMTP_FROM").unwrap_or_else(|| username.clone());

        Ok(Some(Self {
            host,
            port,
            secure: get_env_flag("SMTP_SECURE"),
            username,
            password: SecretString::from(password),
            from,
        }))
    }
}

impl TwilioConfig {
    /// A partial Twilio configuration is treated as absent; the WhatsApp
    /// sender then reports every attempt as skipped.
    fn from_env() -> Option<Self> {
        let account_sid = get_optional_env("TWILIO_ACCOUNT_SID")?;
        let auth_token = get_optional_env("TWILIO_AUTH_TOKEN")?;
        let whatsapp_from = get_optional_env("TWILIO_WHATSAPP_FROM")?;
        let whatsapp_to = get_optional_env("WHATSAPP_NOTIFICATION_TO")?;

        Some(Self {
            account_sid,
            auth_token: SecretString::from(auth_token),
            whatsapp_from,
            whatsapp_to,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get database URL with fallback to generic `DATABASE_URL`
/// (set by Railway-style postgres attachment).
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Boolean flag: set and equal to `true` or `1`.
fn get_env_flag(key: &str) -> bool {
    std::env::var(key).is_ok_and(|v| v == "true" || v == "1")
}

/// Validate that a session secret meets minimum length requirements.
fn validate_session_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_SESSION_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_SESSION_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_session_secret_too_short() {
        let secret = SecretString::from("short");
        let result = validate_session_secret(&secret, "TEST_SESSION");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_session_secret_valid_length() {
        let secret = SecretString::from("a".repeat(32));
        let result = validate_session_secret(&secret, "TEST_SESSION");
        assert!(result.is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = SiteConfig {
            database: DatabaseConfig {
                url: SecretString::from("postgres://localhost/test"),
                tls: false,
            },
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            session_secret: SecretString::from("x".repeat(32)),
            smtp: None,
            notification_email: None,
            twilio: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_smtp_config_debug_redacts_password() {
        let config = SmtpConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            secure: false,
            username: "notify@example.com".to_string(),
            password: SecretString::from("super_secret_password"),
            from: "notify@example.com".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("smtp.example.com"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_password"));
    }

    #[test]
    fn test_twilio_config_debug_redacts_token() {
        let config = TwilioConfig {
            account_sid: "AC123".to_string(),
            auth_token: SecretString::from("super_secret_token"),
            whatsapp_from: "whatsapp:+14155238886".to_string(),
            whatsapp_to: "whatsapp:+1234567890".to_string(),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("AC123"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_token"));
    }
}
