//! Change User State Use Case
//!
//! Deactivation and soft deletion. Deleted rows stay so audit entries keep
//! resolving their actor.

use std::sync::Arc;

use audit::{AuditAction, AuditRecorder, AuditRepository};
use kernel::id::UserId;

use crate::domain::repository::UserRepository;
use crate::domain::value_object::UserState;
use crate::error::{AuthError, AuthResult};

/// Administrative transition applied to a user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStateChange {
    Deactivate,
    Delete,
}

impl UserStateChange {
    pub fn target(self) -> UserState {
        match self {
            UserStateChange::Deactivate => UserState::Disabled,
            UserStateChange::Delete => UserState::Deleted,
        }
    }

    fn action(self) -> AuditAction {
        match self {
            UserStateChange::Deactivate => AuditAction::UserDeactivated,
            UserStateChange::Delete => AuditAction::UserDeleted,
        }
    }

    fn verb(self) -> &'static str {
        match self {
            UserStateChange::Deactivate => "deactivated",
            UserStateChange::Delete => "deleted",
        }
    }
}

pub struct ChangeUserStateUseCase<U, A>
where
    U: UserRepository,
    A: AuditRepository,
{
    user_repo: Arc<U>,
    recorder: AuditRecorder<A>,
}

impl<U, A> ChangeUserStateUseCase<U, A>
where
    U: UserRepository,
    A: AuditRepository,
{
    pub fn new(user_repo: Arc<U>, recorder: AuditRecorder<A>) -> Self {
        Self {
            user_repo,
            recorder,
        }
    }

    /// Repeating a change on a user already in the target state is a no-op
    /// transition that is still audited. `Deleted` is terminal.
    pub async fn execute(
        &self,
        actor: UserId,
        user_id: UserId,
        change: UserStateChange,
    ) -> AuthResult<()> {
        if self.user_repo.find_by_id(user_id).await?.is_none() {
            return Err(AuthError::UserNotFound);
        }
        if !self.user_repo.set_state(user_id, change.target()).await? {
            return Err(AuthError::UserDeleted);
        }

        self.recorder
            .record(
                actor,
                change.action(),
                &format!("User {user_id} {}", change.verb()),
            )
            .await?;

        tracing::info!(
            user_id = %user_id,
            changed_by = %actor,
            state = ?change.target(),
            "User state changed"
        );

        Ok(())
    }
}
