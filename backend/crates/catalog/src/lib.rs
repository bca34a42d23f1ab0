//! Catalog Backend Module
//!
//! Product categories and products, managed by administrators and
//! managers. Every mutation is recorded in the audit trail.
//!
//! Clean Architecture structure:
//! - `domain/` - Entities and repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL implementation
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{CatalogError, CatalogResult};
pub use infra::postgres::PgCatalogRepository;
pub use presentation::router::{catalog_router, catalog_router_generic};

#[cfg(test)]
mod tests;
