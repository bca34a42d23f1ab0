//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use std::time::Duration;

use kernel::id::{RoleId, UserId};
use platform::password::HashedPassword;

use crate::domain::entity::{NewRole, NewUser, ProfileUpdate, Role, User};
use crate::domain::value_object::{Email, UserState, VerificationCode};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new `Fresh` user without a password
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    async fn find_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check whether another user already holds this email
    async fn exists_by_email(&self, email: &Email, exclude: Option<UserId>) -> AuthResult<bool>;

    async fn update_profile(&self, user_id: UserId, update: &ProfileUpdate) -> AuthResult<()>;

    async fn update_names(
        &self,
        user_id: UserId,
        first_name: &str,
        last_name: &str,
    ) -> AuthResult<()>;

    /// Store the password hash and move the user from `Fresh` to `Verified`.
    ///
    /// The transition is conditional on the user still being `Fresh`;
    /// returns `false` when another request got there first.
    async fn activate(&self, user_id: UserId, password_hash: &HashedPassword) -> AuthResult<bool>;

    /// Move a user to `state` unless it is already `Deleted`.
    /// Returns `false` when the user is `Deleted` (or gone).
    async fn set_state(&self, user_id: UserId, state: UserState) -> AuthResult<bool>;

    /// All users with their role, oldest first
    async fn list_with_roles(&self) -> AuthResult<Vec<(User, Role)>>;
}

/// Role repository trait
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    async fn create(&self, role: &NewRole) -> AuthResult<Role>;

    async fn find_by_id(&self, role_id: RoleId) -> AuthResult<Option<Role>>;

    async fn find_by_name(&self, name: &str) -> AuthResult<Option<Role>>;
}

/// Expiring store mapping a verification code to the user it was issued for
#[trait_variant::make(VerificationCodeStore: Send)]
pub trait LocalVerificationCodeStore {
    /// Generate a fresh code bound to `user_id` that expires after `ttl`
    async fn issue(&self, user_id: UserId, ttl: Duration) -> AuthResult<VerificationCode>;

    /// Look up the user a code was issued for. Expired or unknown codes
    /// resolve to `None`.
    async fn resolve(&self, code: &VerificationCode) -> AuthResult<Option<UserId>>;

    /// Remove a code. Returns `false` if it was already gone.
    async fn invalidate(&self, code: &VerificationCode) -> AuthResult<bool>;
}
