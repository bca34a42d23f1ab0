//! Auth (Users and Roles) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL and Redis implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Administrator-created accounts, activated through a mailed
//!   single-use code that lets the user set their own password
//! - Email + password login issuing JWT access/refresh tokens
//! - Role creation, user maintenance and self-service name change
//!
//! ## Account lifecycle
//! `Fresh` → `Verified` on password set; any state → `Disabled` on
//! deactivation; any state → `Deleted` (terminal). Only `Verified` users
//! receive tokens.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{BootstrapAdminInput, BootstrapAdminUseCase};
pub use error::{AuthError, AuthResult};
pub use infra::{PgAuthRepository, RedisCodeStore};
pub use presentation::router::{auth_router, auth_router_generic};
