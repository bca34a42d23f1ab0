//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use std::borrow::Cow;

use audit::AuditError;
use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::AppError,
    conversions::{sqlx_error_kind, validation_details},
    kind::ErrorKind,
};
use platform::jwt::TokenError;
use platform::mail::MailError;
use platform::password::PasswordHashError;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Validation error")]
    Validation(#[from] ValidationErrors),

    #[error("User not found")]
    UserNotFound,

    #[error("Role not found")]
    RoleNotFound,

    #[error("User with this email already exists")]
    EmailTaken,

    #[error("Role already exists")]
    RoleNameTaken,

    /// Deleted users accept no further transitions
    #[error("User is deleted")]
    UserDeleted,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account is not activated")]
    AccountNotActivated,

    #[error("Account is disabled or deleted")]
    AccountUnavailable,

    #[error("Invalid or expired code")]
    InvalidCode,

    #[error("Password has already been set")]
    PasswordAlreadySet,

    #[error("Failed to send notification: {0}")]
    Notification(#[from] MailError),

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] PasswordHashError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::InvalidCode => ErrorKind::BadRequest,
            AuthError::UserNotFound | AuthError::RoleNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken
            | AuthError::RoleNameTaken
            | AuthError::UserDeleted
            | AuthError::PasswordAlreadySet => ErrorKind::Conflict,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::AccountNotActivated | AuthError::AccountUnavailable => ErrorKind::Forbidden,
            AuthError::Notification(_) => ErrorKind::BadGateway,
            AuthError::Audit(e) => e.kind(),
            AuthError::Database(e) => sqlx_error_kind(e),
            AuthError::Cache(e) if e.is_io_error() || e.is_timeout() => {
                ErrorKind::ServiceUnavailable
            }
            AuthError::Cache(_)
            | AuthError::Token(_)
            | AuthError::Hashing(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(e) => {
                AppError::bad_request("Validation error").with_details(validation_details(e))
            }
            // Storage internals stay in the logs
            AuthError::Database(_) => AppError::new(self.kind(), "Database error"),
            AuthError::Cache(_) => AppError::new(self.kind(), "Cache error"),
            AuthError::Audit(e) => e.to_app_error(),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Cache(e) => {
                tracing::error!(error = %e, "Verification code store error");
            }
            AuthError::Notification(e) => {
                tracing::error!(error = %e, "Password-set notification failed");
            }
            AuthError::Audit(e) => {
                tracing::error!(error = %e, "Audit write failed after committed change");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Token issuance failed");
            }
            AuthError::Hashing(e) => {
                tracing::error!(error = %e, "Password hashing failed");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidCode => {
                tracing::warn!("Password-set attempted with invalid code");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Build a single-field validation failure
pub(crate) fn field_error(
    field: &'static str,
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    errors.add(field, ValidationError::new(code).with_message(message.into()));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::EmailTaken.kind(), ErrorKind::Conflict);
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::AccountNotActivated.kind(), ErrorKind::Forbidden);
        assert_eq!(AuthError::InvalidCode.kind(), ErrorKind::BadRequest);
        assert_eq!(AuthError::RoleNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            AuthError::Notification(MailError::Timeout).kind(),
            ErrorKind::BadGateway
        );
    }

    #[test]
    fn test_validation_details_carry_field() {
        let err = AuthError::from(field_error("password", "length", "Too short"));
        let app = err.to_app_error();

        assert_eq!(app.status_code(), 400);
        assert_eq!(
            app.details().unwrap()["password"],
            serde_json::json!(["Too short"])
        );
    }

    #[test]
    fn test_database_message_is_generic() {
        let err = AuthError::Database(sqlx::Error::PoolTimedOut);
        let app = err.to_app_error();
        assert_eq!(app.status_code(), 503);
        assert_eq!(app.message(), "Database error");
    }
}
