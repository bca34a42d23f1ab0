//! Domain Layer

pub mod entity;
pub mod repository;

pub use entity::{AuditAction, AuditLog, NewAuditEntry};
pub use repository::AuditRepository;
