//! Create Role Use Case

use std::sync::Arc;

use audit::{AuditAction, AuditRecorder, AuditRepository};
use kernel::id::UserId;
use serde_json::Value;
use validator::Validate;

use kernel::validation::not_blank;
use crate::domain::entity::{NewRole, Role};
use crate::domain::repository::RoleRepository;
use crate::error::{AuthError, AuthResult, field_error};

#[derive(Debug, Clone, Validate)]
pub struct CreateRoleInput {
    #[validate(
        length(min = 1, max = 32, message = "Name must be 1-32 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(required(message = "Permissions are required"))]
    pub permissions: Option<Value>,
}

impl CreateRoleInput {
    /// Surrounding whitespace is dropped before the length rules apply
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ..self
        }
    }
}

pub struct CreateRoleUseCase<R, A>
where
    R: RoleRepository,
    A: AuditRepository,
{
    role_repo: Arc<R>,
    recorder: AuditRecorder<A>,
}

impl<R, A> CreateRoleUseCase<R, A>
where
    R: RoleRepository,
    A: AuditRepository,
{
    pub fn new(role_repo: Arc<R>, recorder: AuditRecorder<A>) -> Self {
        Self {
            role_repo,
            recorder,
        }
    }

    pub async fn execute(&self, actor: UserId, input: CreateRoleInput) -> AuthResult<Role> {
        let input = input.trimmed();
        input.validate()?;

        let permissions = input.permissions.filter(Value::is_object).ok_or_else(|| {
            field_error("permissions", "object", "Permissions must be a JSON object")
        })?;
        let new_role = NewRole::new(&input.name, permissions);

        if self.role_repo.find_by_name(&new_role.name).await?.is_some() {
            return Err(AuthError::RoleNameTaken);
        }

        let role = self.role_repo.create(&new_role).await?;

        self.recorder
            .record(
                actor,
                AuditAction::RoleCreated,
                &format!("Role {} created", role.name),
            )
            .await?;

        tracing::info!(role_id = %role.id, role = %role.name, "Role created");

        Ok(role)
    }
}
