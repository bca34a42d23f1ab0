//! Catalog Error Types

use audit::AuditError;
use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::AppError,
    conversions::{sqlx_error_kind, validation_details},
    kind::ErrorKind,
};
use kernel::id::CategoryId;
use thiserror::Error;
use validator::ValidationErrors;

pub type CatalogResult<T> = Result<T, CatalogError>;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Validation error")]
    Validation(#[from] ValidationErrors),

    #[error("Category not found")]
    CategoryNotFound,

    #[error("Product not found")]
    ProductNotFound,

    #[error("Categories not found: {}", format_ids(.0))]
    UnknownCategories(Vec<CategoryId>),

    #[error("Category already exists")]
    CategoryNameTaken,

    #[error("Product already exists")]
    ProductNameTaken,

    #[error(transparent)]
    Audit(#[from] AuditError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

fn format_ids(ids: &[CategoryId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl CatalogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::CategoryNotFound
            | CatalogError::ProductNotFound
            | CatalogError::UnknownCategories(_) => ErrorKind::NotFound,
            CatalogError::CategoryNameTaken | CatalogError::ProductNameTaken => {
                ErrorKind::Conflict
            }
            CatalogError::Audit(e) => e.kind(),
            CatalogError::Database(e) => sqlx_error_kind(e),
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::Validation(e) => {
                AppError::bad_request("Validation error").with_details(validation_details(e))
            }
            CatalogError::Database(_) => AppError::new(self.kind(), "Database error"),
            CatalogError::Audit(e) => e.to_app_error(),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Audit(e) => {
                tracing::error!(error = %e, "Audit write failed after committed change");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_categories_lists_ids() {
        let err = CatalogError::UnknownCategories(vec![
            CategoryId::from_raw(4),
            CategoryId::from_raw(9),
        ]);
        assert_eq!(err.to_string(), "Categories not found: 4, 9");
        assert_eq!(err.to_app_error().status_code(), 404);
    }

    #[test]
    fn test_name_conflicts_are_409() {
        assert_eq!(CatalogError::CategoryNameTaken.kind(), ErrorKind::Conflict);
        assert_eq!(CatalogError::ProductNameTaken.kind(), ErrorKind::Conflict);
    }
}
