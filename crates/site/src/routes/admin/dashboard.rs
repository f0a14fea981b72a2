//! Dashboard route handlers: submission list, detail, status, delete.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};

use ridgeline_core::SubmissionId;

use crate::db::{NotificationLogRepository, SubmissionRepository};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{NotificationLogEntry, Submission};
use crate::state::AppState;

/// Dashboard template: all submissions, newest first.
#[derive(Template, WebTemplate)]
#[template(path = "admin/dashboard.html")]
pub struct DashboardTemplate {
    pub submissions: Vec<Submission>,
    pub username: String,
    pub error: Option<String>,
}

/// Submission detail template with its notification log.
#[derive(Template, WebTemplate)]
#[template(path = "admin/submission.html")]
pub struct SubmissionDetailTemplate {
    pub submission: Submission,
    pub logs: Vec<NotificationLogEntry>,
    pub username: String,
}

/// Status update request body.
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

/// JSON response for mutations.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    pub success: bool,
}

/// Dashboard: list all submissions, newest first.
///
/// GET /admin
pub async fn index(State(state): State<AppState>, RequireAdmin(admin): RequireAdmin) -> Response {
    let repo = SubmissionRepository::new(state.pool());

    match repo.list_all().await {
        Ok(submissions) => DashboardTemplate {
            submissions,
            username: admin.username,
            error: None,
        }
        .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "failed to load submissions");
            DashboardTemplate {
                submissions: Vec::new(),
                username: admin.username,
                error: Some("Failed to load submissions".to_string()),
            }
            .into_response()
        }
    }
}

/// Submission detail with its notification log, newest first.
///
/// GET /admin/submission/{id}
///
/// Unknown IDs and load failures go back to the dashboard.
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Response {
    let id = SubmissionId::new(id);
    let submissions = SubmissionRepository::new(state.pool());
    let logs_repo = NotificationLogRepository::new(state.pool());

    let submission = match submissions.get_by_id(id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => return Redirect::to("/admin").into_response(),
        Err(e) => {
            tracing::error!(error = %e, %id, "failed to load submission");
            return Redirect::to("/admin").into_response();
        }
    };

    let logs = match logs_repo.list_for_submission(id).await {
        Ok(logs) => logs,
        Err(e) => {
            tracing::error!(error = %e, %id, "failed to load notification logs");
            return Redirect::to("/admin").into_response();
        }
    };

    SubmissionDetailTemplate {
        submission,
        logs,
        username: admin.username,
    }
    .into_response()
}

/// Update a submission's status. Any string is accepted.
///
/// POST /admin/submission/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<MutationResponse>> {
    let repo = SubmissionRepository::new(state.pool());
    repo.update_status(SubmissionId::new(id), &update.status)
        .await?;

    Ok(Json(MutationResponse { success: true }))
}

/// Delete a submission and its notification log rows.
///
/// DELETE /admin/submission/{id}
///
/// Deleting an unknown ID succeeds; there is simply nothing to remove.
pub async fn destroy(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<i32>,
) -> Result<Json<MutationResponse>> {
    let id = SubmissionId::new(id);
    let repo = SubmissionRepository::new(state.pool());
    repo.delete(id).await?;

    tracing::info!(%id, "submission deleted");
    Ok(Json(MutationResponse { success: true }))
}
