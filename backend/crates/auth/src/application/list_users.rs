//! List Users Use Case

use std::sync::Arc;

use crate::domain::entity::{Role, User};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;

pub struct ListUsersUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> ListUsersUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self) -> AuthResult<Vec<(User, Role)>> {
        self.user_repo.list_with_roles().await
    }
}
