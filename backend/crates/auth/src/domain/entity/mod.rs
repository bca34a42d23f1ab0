//! Entity Module

pub mod role;
pub mod user;

pub use role::{NewRole, Role};
pub use user::{NewUser, ProfileUpdate, User};
