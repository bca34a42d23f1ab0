//! Change Info Use Case
//!
//! Lets any staff member rename themselves.

use std::sync::Arc;

use kernel::id::UserId;
use validator::Validate;

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Validate)]
pub struct ChangeInfoInput {
    #[validate(length(min = 5, max = 32, message = "First name must be 5-32 characters"))]
    pub first_name: String,
    #[validate(length(min = 5, max = 32, message = "Last name must be 5-32 characters"))]
    pub last_name: String,
}

impl ChangeInfoInput {
    /// Surrounding whitespace is dropped before the length rules apply
    fn trimmed(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
        }
    }
}

pub struct ChangeInfoUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ChangeInfoUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, actor: UserId, input: ChangeInfoInput) -> AuthResult<()> {
        let input = input.trimmed();
        input.validate()?;

        let user = self
            .user_repo
            .find_by_id(actor)
            .await?
            .ok_or(AuthError::UserNotFound)?;
        if user.state.is_terminal() {
            return Err(AuthError::UserDeleted);
        }

        self.user_repo
            .update_names(actor, &input.first_name, &input.last_name)
            .await?;

        tracing::debug!(user_id = %actor, "User changed own info");

        Ok(())
    }
}
