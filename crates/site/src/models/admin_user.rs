//! Admin user model.

use chrono::{DateTime, Utc};

use ridgeline_core::{AdminUserId, Email};

/// A dashboard administrator.
///
/// The password hash never leaves the repository layer; it is returned
/// alongside the user only by the credential lookup used for login.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub username: String,
    pub email: Option<Email>,
    pub created_at: DateTime<Utc>,
}
