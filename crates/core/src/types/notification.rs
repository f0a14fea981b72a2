//! Notification channel and delivery status enums.
//!
//! Both are stored as lowercase text in the `notification_logs` table and
//! round-trip through `Display`/`FromStr`.

use serde::{Deserialize, Serialize};

/// Channel a notification was attempted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationChannel {
    /// SMTP email notification.
    Email,
    /// WhatsApp message via the Twilio API.
    Whatsapp,
}

impl NotificationChannel {
    /// The lowercase tag stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Whatsapp => "whatsapp",
        }
    }
}

impl std::fmt::Display for NotificationChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for NotificationChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "whatsapp" => Ok(Self::Whatsapp),
            _ => Err(format!("invalid notification channel: {s}")),
        }
    }
}

/// Outcome of a notification attempt as recorded in the log.
///
/// The log only distinguishes delivered from not-delivered; a skipped
/// attempt (unconfigured sender) is recorded as `Failed` with the skip
/// reason in the detail column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    /// The transport accepted the message.
    Sent,
    /// The attempt was skipped or the transport rejected the message.
    Failed,
}

impl DeliveryStatus {
    /// The lowercase tag stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }
}

impl std::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sent" => Ok(Self::Sent),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("invalid delivery status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_roundtrip() {
        for channel in [NotificationChannel::Email, NotificationChannel::Whatsapp] {
            let parsed: NotificationChannel = channel.as_str().parse().unwrap();
            assert_eq!(parsed, channel);
        }
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [DeliveryStatus::Sent, DeliveryStatus::Failed] {
            let parsed: DeliveryStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_tags_rejected() {
        assert!("sms".parse::<NotificationChannel>().is_err());
        assert!("pending".parse::<DeliveryStatus>().is_err());
    }

    #[test]
    fn test_serde_tags_match_db_tags() {
        let json = serde_json::to_string(&NotificationChannel::Whatsapp).unwrap();
        assert_eq!(json, "\"whatsapp\"");
        let json = serde_json::to_string(&DeliveryStatus::Failed).unwrap();
        assert_eq!(json, "\"failed\"");
    }
}
