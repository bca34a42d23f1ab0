//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::{NewRole, NewUser, ProfileUpdate, Role, User};
pub use repository::{RoleRepository, UserRepository, VerificationCodeStore};
