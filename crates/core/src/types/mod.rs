//! Core types for the Ridgeline Digital site.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod notification;

pub use email::{Email, EmailError};
pub use id::*;
pub use notification::{DeliveryStatus, NotificationChannel};
