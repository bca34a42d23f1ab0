//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - The error envelope and database/validation error classification
//! - Typed integer IDs for every persisted entity
//! - The `{code, message, data}` response envelope
//! - The role vocabulary used by the role gate
//! - Field validators shared by request inputs
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod response;
pub mod role;
#[cfg(feature = "validator")]
pub mod validation;
