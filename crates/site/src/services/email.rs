//! Email notification sender.
//!
//! Wraps an SMTP transport via lettre, with askama templates for the
//! notification bodies. The transport is resolved from configuration once
//! at startup: missing settings produce the `Unconfigured` variant, whose
//! send path reports `Skipped` instead of erroring.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use super::{ConnectionCheck, DeliveryOutcome, NotificationPayload};
use crate::config::SmtpConfig;

/// HTML template for the submission notification email.
#[derive(Template)]
#[template(path = "email/submission.html")]
struct SubmissionEmailHtml<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    company: &'a str,
    message: &'a str,
    submitted_at: String,
}

/// Plain text template for the submission notification email.
#[derive(Template)]
#[template(path = "email/submission.txt")]
struct SubmissionEmailText<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    company: &'a str,
    message: &'a str,
    submitted_at: String,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Email sender, resolved from configuration at startup.
#[derive(Clone)]
pub enum EmailSender {
    /// Required settings were absent; every send reports `Skipped`.
    Unconfigured {
        reason: &'static str,
    },
    Configured {
        mailer: AsyncSmtpTransport<Tokio1Executor>,
        from: String,
        to: String,
    },
}

impl EmailSender {
    /// Resolve the sender from configuration.
    ///
    /// Both an SMTP transport and a notification recipient are required for
    /// the `Configured` variant; otherwise sends are skipped.
    ///
    /// # Errors
    ///
    /// Returns `SmtpError` if the relay builder rejects the host.
    pub fn from_config(
        smtp: Option<&SmtpConfig>,
        recipient: Option<&str>,
    ) -> Result<Self, SmtpError> {
        let Some(smtp) = smtp else {
            return Ok(Self::Unconfigured {
                reason: "SMTP transport not configured",
            });
        };
        let Some(recipient) = recipient else {
            return Ok(Self::Unconfigured {
                reason: "notification recipient not configured",
            });
        };

        let credentials = Credentials::new(
            smtp.username.clone(),
            smtp.password.expose_secret().to_string(),
        );

        let builder = if smtp.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&smtp.host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&smtp.host)?
        };
        let mailer = builder.port(smtp.port).credentials(credentials).build();

        Ok(Self::Configured {
            mailer,
            from: smtp.from.clone(),
            to: recipient.to_owned(),
        })
    }

    /// Whether a transport was resolved at startup.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Configured { .. })
    }

    /// Send the notification email for one submission.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the message cannot be built or the transport
    /// rejects it. An unconfigured sender returns `Ok(Skipped)` instead.
    pub async fn send_notification(
        &self,
        payload: &NotificationPayload,
    ) -> Result<DeliveryOutcome, EmailError> {
        let (mailer, from, to) = match *self {
            Self::Unconfigured { reason } => {
                return Ok(DeliveryOutcome::Skipped { reason });
            }
            Self::Configured {
                ref mailer,
                ref from,
                ref to,
            } => (mailer, from, to),
        };

        let phone = payload.phone.as_deref().unwrap_or("Not provided");
        let company = payload.company.as_deref().unwrap_or("Not provided");
        let submitted_at = payload.submitted_at.to_rfc3339();

        let html = SubmissionEmailHtml {
            name: &payload.name,
            email: &payload.email,
            phone,
            company,
            message: &payload.message,
            submitted_at: submitted_at.clone(),
        }
        .render()?;
        let text = SubmissionEmailText {
            name: &payload.name,
            email: &payload.email,
            phone,
            company,
            message: &payload.message,
            submitted_at,
        }
        .render()?;

        let message = Message::builder()
            .from(from
                .parse()
                .map_err(|_| EmailError::InvalidAddress(from.clone()))?)
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.clone()))?)
            .subject(format!(
                "New Contact Form Submission from {}",
                payload.name
            ))
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )?;

        let response = mailer.send(message).await?;
        tracing::info!(to = %to, "contact notification email sent");

        Ok(DeliveryOutcome::Sent {
            reference: response.code().to_string(),
        })
    }

    /// Connectivity self-check (SMTP NOOP), for diagnostics only.
    pub async fn verify_connection(&self) -> ConnectionCheck {
        match self {
            Self::Unconfigured { .. } => ConnectionCheck::Unconfigured,
            Self::Configured { mailer, .. } => match mailer.test_connection().await {
                Ok(true) => ConnectionCheck::Connected,
                Ok(false) => {
                    ConnectionCheck::Failed("SMTP server refused the connection".to_owned())
                }
                Err(e) => ConnectionCheck::Failed(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn payload() -> NotificationPayload {
        NotificationPayload {
            name: "Jo".to_owned(),
            email: "jo@x.com".to_owned(),
            phone: None,
            company: None,
            message: "Hi".to_owned(),
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_send_is_skipped() {
        let sender = EmailSender::from_config(None, None).unwrap();
        assert!(!sender.is_configured());

        let outcome = sender.send_notification(&payload()).await.unwrap();
        assert_eq!(
            outcome,
            DeliveryOutcome::Skipped {
                reason: "SMTP transport not configured"
            }
        );
    }

    #[tokio::test]
    async fn test_missing_recipient_is_skipped() {
        let smtp = SmtpConfig {
            host: "smtp.example.com".to_owned(),
            port: 587,
            secure: false,
            username: "notify@example.com".to_owned(),
            password: secrecy::SecretString::from("app-password"),
            from: "notify@example.com".to_owned(),
        };

        let sender = EmailSender::from_config(Some(&smtp), None).unwrap();
        let outcome = sender.send_notification(&payload()).await.unwrap();
        assert_eq!(
            outcome,
            DeliveryOutcome::Skipped {
                reason: "notification recipient not configured"
            }
        );
    }

    #[tokio::test]
    async fn test_unconfigured_verify_connection() {
        let sender = EmailSender::from_config(None, Some("ops@example.com")).unwrap();
        assert_eq!(
            sender.verify_connection().await,
            ConnectionCheck::Unconfigured
        );
    }

    #[test]
    fn test_templates_render() {
        let html = SubmissionEmailHtml {
            name: "Jo",
            email: "jo@x.com",
            phone: "Not provided",
            company: "Acme",
            message: "Hello <there>",
            submitted_at: "2026-01-01T00:00:00Z".to_owned(),
        }
        .render()
        .unwrap();
        assert!(html.contains("Jo"));
        // HTML bodies are escaped
        assert!(html.contains("&lt;there&gt;"));

        let text = SubmissionEmailText {
            name: "Jo",
            email: "jo@x.com",
            phone: "Not provided",
            company: "Acme",
            message: "Hello <there>",
            submitted_at: "2026-01-01T00:00:00Z".to_owned(),
        }
        .render()
        .unwrap();
        // Plain text bodies are not
        assert!(text.contains("Hello <there>"));
    }
}
