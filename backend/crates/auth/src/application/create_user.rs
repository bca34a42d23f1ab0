//! Create User Use Case
//!
//! Administrator-driven account creation. The new user has no password;
//! a single-use code is mailed so they can set one.

use std::collections::BTreeMap;
use std::sync::Arc;

use audit::{AuditAction, AuditRecorder, AuditRepository};
use kernel::id::{RoleId, UserId};
use platform::mail::{MailMessage, Mailer, send_with_timeout};
use validator::Validate;

use crate::application::config::AuthConfig;
use kernel::validation::not_blank;
use crate::domain::entity::{NewUser, User};
use crate::domain::repository::{RoleRepository, UserRepository, VerificationCodeStore};
use crate::domain::value_object::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Validate)]
pub struct CreateUserInput {
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

impl CreateUserInput {
    /// Surrounding whitespace is dropped before the length rules apply
    fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            ..self
        }
    }
}

pub struct CreateUserUseCase<U, R, C, A, M>
where
    U: UserRepository,
    R: RoleRepository,
    C: VerificationCodeStore,
    A: AuditRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    codes: Arc<C>,
    recorder: AuditRecorder<A>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, R, C, A, M> CreateUserUseCase<U, R, C, A, M>
where
    U: UserRepository,
    R: RoleRepository,
    C: VerificationCodeStore,
    A: AuditRepository,
    M: Mailer + Sync,
{
    pub fn new(
        user_repo: Arc<U>,
        role_repo: Arc<R>,
        codes: Arc<C>,
        recorder: AuditRecorder<A>,
        mailer: Arc<M>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            codes,
            recorder,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, actor: UserId, input: CreateUserInput) -> AuthResult<User> {
        let input = input.trimmed();
        input.validate()?;
        let email = Email::new(input.email)?;
        let role_id = RoleId::from_raw(input.role_id);

        if self.user_repo.exists_by_email(&email, None).await? {
            return Err(AuthError::EmailTaken);
        }
        if self.role_repo.find_by_id(role_id).await?.is_none() {
            return Err(AuthError::RoleNotFound);
        }

        let user = self
            .user_repo
            .create(&NewUser {
                email,
                first_name: input.name,
                last_name: None,
                role_id,
            })
            .await?;

        self.recorder
            .record(
                actor,
                AuditAction::UserCreated,
                &format!("User {} created", user.email),
            )
            .await?;

        tracing::info!(user_id = %user.id, created_by = %actor, "User created");

        let code = self.codes.issue(user.id, self.config.code_ttl).await?;
        let message = MailMessage {
            to_email: user.email.to_string(),
            to_name: user.display_name(),
            template_id: self.config.password_setup_template_id,
            params: BTreeMap::from([
                ("code".to_string(), code.to_string()),
                ("username".to_string(), user.display_name()),
                (
                    "link".to_string(),
                    self.config.password_setup_link(code.as_str()),
                ),
            ]),
        };

        send_with_timeout(self.mailer.as_ref(), &message, self.config.notify_timeout).await?;

        Ok(user)
    }
}
