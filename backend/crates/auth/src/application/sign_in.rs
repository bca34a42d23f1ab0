//! Sign In Use Case
//!
//! Authenticates a `Verified` user by email and password and issues a
//! token pair carrying `(id, email, role)`.

use std::sync::Arc;

use kernel::id::UserId;
use platform::jwt::{SessionClaims, TokenPair, TokenService};
use platform::password::ClearTextPassword;
use validator::Validate;

use crate::application::config::AuthConfig;
use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::value_object::{Email, UserState};
use crate::error::{AuthError, AuthResult};

#[derive(Clone, Validate)]
pub struct SignInInput {
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    pub remember_me: bool,
}

#[derive(Debug)]
pub struct SignInOutput {
    pub id: UserId,
    pub email: String,
    pub role: String,
    pub tokens: TokenPair,
}

pub struct SignInUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    tokens: Arc<TokenService>,
    config: Arc<AuthConfig>,
}

impl<U, R> SignInUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        role_repo: Arc<R>,
        tokens: Arc<TokenService>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        input.validate()?;
        let email = Email::new(input.email)?;

        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        match user.state {
            UserState::Verified => {}
            UserState::Fresh => return Err(AuthError::AccountNotActivated),
            UserState::Disabled | UserState::Deleted => return Err(AuthError::AccountUnavailable),
        }

        let hash = user
            .password_hash
            .as_ref()
            .ok_or(AuthError::AccountNotActivated)?;
        // A password that fails the policy can never match a stored hash
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;
        if !self.config.hasher().verify(&password, hash) {
            tracing::warn!(user_id = %user.id, "Password mismatch on sign in");
            return Err(AuthError::InvalidCredentials);
        }

        let role = self
            .role_repo
            .find_by_id(user.role_id)
            .await?
            .ok_or_else(|| AuthError::Internal(format!("role {} missing", user.role_id)))?;

        let claims = SessionClaims::new(user.id.value(), user.email.as_str(), role.name.as_str());
        let tokens = self.tokens.issue(&claims, input.remember_me)?;

        tracing::info!(user_id = %user.id, role = %role.name, "User signed in");

        Ok(SignInOutput {
            id: user.id,
            email: user.email.to_string(),
            role: role.name,
            tokens,
        })
    }
}
