//! Update User Use Case
//!
//! Administrator edit of another user's name, email and role.

use std::sync::Arc;

use audit::{AuditAction, AuditRecorder, AuditRepository};
use kernel::id::{RoleId, UserId};
use validator::Validate;

use kernel::validation::not_blank;
use crate::domain::entity::ProfileUpdate;
use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Validate)]
pub struct UpdateUserInput {
    #[validate(
        length(min = 1, max = 64, message = "Name must be 1-64 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(email(message = "Email is invalid"))]
    pub email: String,
    #[validate(range(min = 1, message = "Role is required"))]
    pub role_id: i64,
}

impl UpdateUserInput {
    /// Surrounding whitespace is dropped before the length rules apply
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ..self
        }
    }
}

pub struct UpdateUserUseCase<U, R, A>
where
    U: UserRepository,
    R: RoleRepository,
    A: AuditRepository,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    recorder: AuditRecorder<A>,
}

impl<U, R, A> UpdateUserUseCase<U, R, A>
where
    U: UserRepository,
    R: RoleRepository,
    A: AuditRepository,
{
    pub fn new(user_repo: Arc<U>, role_repo: Arc<R>, recorder: AuditRecorder<A>) -> Self {
        Self {
            user_repo,
            role_repo,
            recorder,
        }
    }

    pub async fn execute(
        &self,
        actor: UserId,
        user_id: UserId,
        input: UpdateUserInput,
    ) -> AuthResult<()> {
        let input = input.trimmed();
        input.validate()?;
        let email = Email::new(input.email)?;
        let role_id = RoleId::from_raw(input.role_id);

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if user.state.is_terminal() {
            return Err(AuthError::UserDeleted);
        }
        if self.user_repo.exists_by_email(&email, Some(user_id)).await? {
            return Err(AuthError::EmailTaken);
        }
        if self.role_repo.find_by_id(role_id).await?.is_none() {
            return Err(AuthError::RoleNotFound);
        }

        self.user_repo
            .update_profile(
                user_id,
                &ProfileUpdate {
                    email,
                    first_name: input.name,
                    role_id,
                },
            )
            .await?;

        self.recorder
            .record(
                actor,
                AuditAction::UserUpdated,
                &format!("User {user_id} updated"),
            )
            .await?;

        tracing::info!(user_id = %user_id, updated_by = %actor, "User updated");

        Ok(())
    }
}
