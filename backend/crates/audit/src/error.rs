//! Audit Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions::sqlx_error_kind, kind::ErrorKind};
use kernel::id::UserId;
use thiserror::Error;

pub type AuditResult<T> = Result<T, AuditError>;

#[derive(Debug, Error)]
pub enum AuditError {
    /// The acting user has no row to resolve a name from
    #[error("Audit actor {0} not found")]
    ActorNotFound(UserId),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AuditError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuditError::ActorNotFound(_) => ErrorKind::InternalServerError,
            AuditError::Database(e) => sqlx_error_kind(e),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            // Storage internals stay in the logs
            AuditError::Database(_) => AppError::new(self.kind(), "Database error"),
            AuditError::ActorNotFound(_) => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuditError::ActorNotFound(actor) => {
                tracing::error!(actor_id = %actor, "Audit actor missing");
            }
            AuditError::Database(e) => {
                tracing::error!(error = %e, "Audit database error");
            }
        }
    }
}

impl IntoResponse for AuditError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
