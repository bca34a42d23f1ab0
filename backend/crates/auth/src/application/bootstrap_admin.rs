//! Bootstrap Admin Use Case
//!
//! Every management route sits behind a role gate, so a fresh database
//! needs one administrator created out of band. Runs at startup when
//! credentials are configured. An existing account with the email is left
//! alone unless it is an administrator still waiting for its password,
//! which happens when an earlier run stopped between creation and
//! activation.

use std::sync::Arc;

use kernel::role::ADMIN;
use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::domain::entity::NewUser;
use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::value_object::{Email, UserState};
use crate::error::{AuthError, AuthResult, field_error};

pub struct BootstrapAdminInput {
    pub email: String,
    pub first_name: String,
    pub password: String,
}

pub struct BootstrapAdminUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<U, R> BootstrapAdminUseCase<U, R>
where
    U: UserRepository,
    R: RoleRepository,
{
    pub fn new(user_repo: Arc<U>, role_repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            role_repo,
            config,
        }
    }

    /// Returns `true` when an administrator was created or completed
    pub async fn execute(&self, input: BootstrapAdminInput) -> AuthResult<bool> {
        let email = Email::new(input.email)?;
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| field_error("password", "policy", e.to_string()))?;
        let role = self
            .role_repo
            .find_by_name(ADMIN)
            .await?
            .ok_or(AuthError::RoleNotFound)?;

        let user = match self.user_repo.find_by_email(&email).await? {
            Some(user) if user.state == UserState::Fresh && user.role_id == role.id => {
                tracing::warn!(user_id = %user.id, "Completing unactivated bootstrap admin");
                user
            }
            Some(_) => {
                tracing::debug!(email = %email, "Bootstrap admin already present");
                return Ok(false);
            }
            None => {
                self.user_repo
                    .create(&NewUser {
                        email,
                        first_name: input.first_name,
                        last_name: None,
                        role_id: role.id,
                    })
                    .await?
            }
        };

        let hash = self.config.hasher().hash(&password)?;
        if !self.user_repo.activate(user.id, &hash).await? {
            return Err(AuthError::Internal(format!(
                "bootstrap admin {} could not be activated",
                user.id
            )));
        }

        tracing::info!(user_id = %user.id, "Bootstrap administrator created");

        Ok(true)
    }
}
