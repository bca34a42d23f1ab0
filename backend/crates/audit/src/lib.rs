//! Audit Trail Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Audit entries, action labels, repository trait
//! - `application/` - Recorder used by other modules, log listing
//! - `infra/` - Database implementation
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! Every administrative mutation in the user, role and catalog modules
//! appends one entry naming the actor who performed it. Entries are
//! append-only.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuditRecorder, ListAuditLogsUseCase};
pub use domain::entity::{AuditAction, AuditLog, NewAuditEntry, display_name};
pub use domain::repository::AuditRepository;
pub use error::{AuditError, AuditResult};
pub use infra::postgres::PgAuditRepository;
pub use presentation::router::{audit_router, audit_router_generic};

#[cfg(test)]
mod tests;
