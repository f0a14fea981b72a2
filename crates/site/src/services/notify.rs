//! Detached notification fan-out.
//!
//! The intake handler calls [`spawn_notifications`] after the submission is
//! stored and never awaits it; the only observable result is the rows the
//! task appends to `notification_logs`. The two channels are attempted
//! concurrently and independently: neither's failure blocks or cancels the
//! other, and there is no retry, timeout, or cancellation path.

use ridgeline_core::{DeliveryStatus, NotificationChannel, SubmissionId};

use super::{DeliveryOutcome, NotificationPayload};
use crate::db::NotificationLogRepository;
use crate::state::AppState;

/// Launch the fan-out for one submission as a detached task.
pub fn spawn_notifications(
    state: AppState,
    submission_id: SubmissionId,
    payload: NotificationPayload,
) {
    tokio::spawn(run_notifications(state, submission_id, payload));
}

/// Attempt both channels and record one log row per attempt.
///
/// Public so tests can await the fan-out deterministically instead of
/// relying on timing.
pub async fn run_notifications(
    state: AppState,
    submission_id: SubmissionId,
    payload: NotificationPayload,
) {
    let email = async {
        let outcome = state
            .email()
            .send_notification(&payload)
            .await
            .map_err(|e| e.to_string());
        record_outcome(&state, submission_id, NotificationChannel::Email, outcome).await;
    };

    let whatsapp = async {
        let outcome = state
            .whatsapp()
            .send_notification(&payload)
            .await
            .map_err(|e| e.to_string());
        record_outcome(&state, submission_id, NotificationChannel::Whatsapp, outcome).await;
    };

    tokio::join!(email, whatsapp);
}

/// Map one attempt's result to the row that gets logged.
///
/// Skips and errors land in the same place: a `failed` row whose detail
/// says why.
fn outcome_to_row(outcome: &Result<DeliveryOutcome, String>) -> (DeliveryStatus, String) {
    match outcome {
        Ok(DeliveryOutcome::Sent { reference }) => {
            (DeliveryStatus::Sent, format!("delivered ({reference})"))
        }
        Ok(DeliveryOutcome::Skipped { reason }) => {
            (DeliveryStatus::Failed, format!("skipped: {reason}"))
        }
        Err(detail) => (DeliveryStatus::Failed, detail.clone()),
    }
}

/// Write the log row for one attempt; failures to write are traced and
/// swallowed so one channel's bookkeeping never affects the other.
async fn record_outcome(
    state: &AppState,
    submission_id: SubmissionId,
    channel: NotificationChannel,
    outcome: Result<DeliveryOutcome, String>,
) {
    let (status, detail) = outcome_to_row(&outcome);

    if status == DeliveryStatus::Failed {
        tracing::warn!(%submission_id, %channel, %detail, "notification not delivered");
    }

    let repo = NotificationLogRepository::new(state.pool());
    if let Err(e) = repo.create(submission_id, channel, status, &detail).await {
        tracing::error!(%submission_id, %channel, error = %e, "failed to record notification outcome");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sent_outcome_maps_to_sent_row() {
        let outcome = Ok(DeliveryOutcome::Sent {
            reference: "SM123".to_owned(),
        });
        let (status, detail) = outcome_to_row(&outcome);
        assert_eq!(status, DeliveryStatus::Sent);
        assert_eq!(detail, "delivered (SM123)");
    }

    #[test]
    fn test_skipped_outcome_maps_to_failed_row() {
        let outcome = Ok(DeliveryOutcome::Skipped {
            reason: "SMTP transport not configured",
        });
        let (status, detail) = outcome_to_row(&outcome);
        assert_eq!(status, DeliveryStatus::Failed);
        assert_eq!(detail, "skipped: SMTP transport not configured");
    }

    #[test]
    fn test_error_maps_to_failed_row_with_raw_detail() {
        let outcome = Err("SMTP error: connection refused".to_owned());
        let (status, detail) = outcome_to_row(&outcome);
        assert_eq!(status, DeliveryStatus::Failed);
        assert_eq!(detail, "SMTP error: connection refused");
    }
}
