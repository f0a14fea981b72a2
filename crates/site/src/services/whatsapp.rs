//! WhatsApp notification sender.
//!
//! Sends WhatsApp messages through the Twilio Messages REST API. Like the
//! email sender, the client is resolved from configuration once at startup;
//! absent settings produce the `Unconfigured` variant whose send path
//! reports `Skipped`.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

use super::{ConnectionCheck, DeliveryOutcome, NotificationPayload};
use crate::config::TwilioConfig;

/// Twilio REST API base URL.
const API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Errors that can occur when interacting with the Twilio API.
#[derive(Debug, Error)]
pub enum WhatsAppError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Created message resource, as returned by the Messages endpoint.
#[derive(Debug, Deserialize)]
struct MessageResource {
    sid: String,
}

/// WhatsApp sender, resolved from configuration at startup.
#[derive(Clone)]
pub enum WhatsAppSender {
    /// Required settings were absent; every send reports `Skipped`.
    Unconfigured { reason: &'static str },
    Configured(WhatsAppClient),
}

/// Twilio API client for sending WhatsApp messages.
#[derive(Clone)]
pub struct WhatsAppClient {
    client: reqwest::Client,
    account_sid: String,
    auth_token: SecretString,
    from: String,
    to: String,
}

impl WhatsAppSender {
    /// Resolve the sender from configuration.
    ///
    /// # Errors
    ///
    /// Returns `reqwest::Error` if the HTTP client fails to build.
    pub fn from_config(twilio: Option<&TwilioConfig>) -> Result<Self, reqwest::Error> {
        let Some(twilio) = twilio else {
            return Ok(Self::Unconfigured {
                reason: "WhatsApp transport not configured",
            });
        };

        let client = reqwest::Client::builder().build()?;

        Ok(Self::Configured(WhatsAppClient {
            client,
            account_sid: twilio.account_sid.clone(),
            auth_token: twilio.auth_token.clone(),
            from: twilio.whatsapp_from.clone(),
            to: twilio.whatsapp_to.clone(),
        }))
    }

    /// Whether a client was resolved at startup.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }

    /// Send the WhatsApp notification for one submission.
    ///
    /// # Errors
    ///
    /// Returns `WhatsAppError` if the API call fails. An unconfigured
    /// sender returns `Ok(Skipped)` instead.
    pub async fn send_notification(
        &self,
        payload: &NotificationPayload,
    ) -> Result<DeliveryOutcome, WhatsAppError> {
        let client = match *self {
            Self::Unconfigured { reason } => {
                return Ok(DeliveryOutcome::Skipped { reason });
            }
            Self::Configured(ref client) => client,
        };

        let sid = client.send_message(&format_message(payload)).await?;
        tracing::info!(message_sid = %sid, "contact notification WhatsApp message sent");

        Ok(DeliveryOutcome::Sent { reference: sid })
    }

    /// Connectivity self-check (account fetch), for diagnostics only.
    pub async fn verify_connection(&self) -> ConnectionCheck {
        match self {
            Self::Unconfigured { .. } => ConnectionCheck::Unconfigured,
            Self::Configured(client) => client.verify_account().await,
        }
    }
}

impl WhatsAppClient {
    /// Send one message through the Messages endpoint.
    async fn send_message(&self, body: &str) -> Result<String, WhatsAppError> {
        let url = format!("{API_BASE}/Accounts/{}/Messages.json", self.account_sid);

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
            .form(&[
                ("Body", body),
                ("From", self.from.as_str()),
                ("To", self.to.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(WhatsAppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let created: MessageResource = response
            .json()
            .await
            .map_err(|e| WhatsAppError::Parse(e.to_string()))?;

        Ok(created.sid)
    }

    /// Fetch the account resource to verify the credentials.
    async fn verify_account(&self) -> ConnectionCheck {
        let url = format!("{API_BASE}/Accounts/{}.json", self.account_sid);

        let result = self
            .client
            .get(&url)
            .basic_auth(&self.account_sid, Some(self.auth_token.expose_secret()))
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => ConnectionCheck::Connected,
            Ok(response) => ConnectionCheck::Failed(format!(
                "Twilio returned status {}",
                response.status()
            )),
            Err(e) => ConnectionCheck::Failed(e.to_string()),
        }
    }
}

/// Format the WhatsApp message body for one submission.
fn format_message(payload: &NotificationPayload) -> String {
    format!(
        "New contact form submission\n\n\
         Name: {}\n\
         Email: {}\n\
         Phone: {}\n\
         Company: {}\n\n\
         Message:\n{}",
        payload.name,
        payload.email,
        payload.phone.as_deref().unwrap_or("N/A"),
        payload.company.as_deref().unwrap_or("N/A"),
        payload.message,
    )
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
            phone: Some("+1 555 0100".to_owned()),
            company: None,
            message: "Hi".to_owned(),
            submitted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_send_is_skipped() {
        let sender = WhatsAppSender::from_config(None).unwrap();
        assert!(!sender.is_configured());

        let outcome = sender.send_notification(&payload()).await.unwrap();
        assert_eq!(
            outcome,
            DeliveryOutcome::Skipped {
                reason: "WhatsApp transport not configured"
            }
        );
    }

    #[tokio::test]
    async fn test_unconfigured_verify_connection() {
        let sender = WhatsAppSender::from_config(None).unwrap();
        assert_eq!(
            sender.verify_connection().await,
            ConnectionCheck::Unconfigured
        );
    }

    #[test]
    fn test_format_message_includes_fields() {
        let body = format_message(&payload());
        assert!(body.contains("Name: Jo"));
        assert!(body.contains("Email: jo@x.com"));
        assert!(body.contains("Phone: +1 555 0100"));
        assert!(body.contains("Company: N/A"));
        assert!(body.contains("Message:\nHi"));
    }
}
