//! Set Password Use Case
//!
//! Redeems a mailed verification code: stores the first password of a
//! `Fresh` user and moves it to `Verified`.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use validator::Validate;

use crate::application::config::AuthConfig;
use crate::domain::repository::{UserRepository, VerificationCodeStore};
use crate::domain::value_object::{UserState, VerificationCode};
use crate::error::{AuthError, AuthResult, field_error};

#[derive(Clone, Validate)]
pub struct SetPasswordInput {
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(
        length(min = 1, message = "Confirm password is required"),
        must_match(other = "password", message = "Passwords do not match")
    )]
    pub confirm_password: String,
}

pub struct SetPasswordUseCase<U, C>
where
    U: UserRepository,
    C: VerificationCodeStore,
{
    user_repo: Arc<U>,
    codes: Arc<C>,
    config: Arc<AuthConfig>,
}

impl<U, C> SetPasswordUseCase<U, C>
where
    U: UserRepository,
    C: VerificationCodeStore,
{
    pub fn new(user_repo: Arc<U>, codes: Arc<C>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            codes,
            config,
        }
    }

    pub async fn execute(&self, input: SetPasswordInput) -> AuthResult<()> {
        input.validate()?;

        let password = ClearTextPassword::new(input.password)
            .map_err(|e| field_error("password", "policy", e.to_string()))?;
        let code = VerificationCode::parse(&input.code).ok_or(AuthError::InvalidCode)?;

        let user_id = self
            .codes
            .resolve(&code)
            .await?
            .ok_or(AuthError::InvalidCode)?;
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::InvalidCode)?;

        match user.state {
            UserState::Fresh => {}
            UserState::Verified => return Err(AuthError::PasswordAlreadySet),
            UserState::Disabled | UserState::Deleted => return Err(AuthError::AccountUnavailable),
        }

        let hash = self.config.hasher().hash(&password)?;

        if !self.user_repo.activate(user.id, &hash).await? {
            return Err(AuthError::PasswordAlreadySet);
        }

        match self.codes.invalidate(&code).await {
            Ok(_) => {}
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Failed to invalidate redeemed code");
            }
        }

        tracing::info!(user_id = %user.id, "Password set, user verified");

        Ok(())
    }
}
