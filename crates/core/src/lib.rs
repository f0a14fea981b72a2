//! Ridgeline Core - Shared types library.
//!
//! This crate provides common types used across the Ridgeline Digital
//! components:
//! - `site` - The public marketing site and admin dashboard binary
//! - `integration-tests` - End-to-end tests over HTTP
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs and emails, plus the
//!   notification channel/status enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
