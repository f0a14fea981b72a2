//! Middleware: session layer and authentication extractors.

pub mod auth;
pub mod session;

pub use auth::{RequireAdmin, clear_session, current_admin, set_current_admin};
pub use session::create_session_layer;
