//! Delete Category Use Case
//!
//! Hard delete. Product links to the category go with it; the products
//! themselves stay.

use std::sync::Arc;

use audit::{AuditAction, AuditRecorder, AuditRepository};
use kernel::id::{CategoryId, UserId};

use crate::domain::repository::CategoryRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct DeleteCategoryUseCase<C, A>
where
    C: CategoryRepository,
    A: AuditRepository,
{
    category_repo: Arc<C>,
    recorder: AuditRecorder<A>,
}

impl<C, A> DeleteCategoryUseCase<C, A>
where
    C: CategoryRepository,
    A: AuditRepository,
{
    pub fn new(category_repo: Arc<C>, recorder: AuditRecorder<A>) -> Self {
        Self {
            category_repo,
            recorder,
        }
    }

    pub async fn execute(&self, actor: UserId, category_id: CategoryId) -> CatalogResult<()> {
        if !self.category_repo.delete(category_id).await? {
            return Err(CatalogError::CategoryNotFound);
        }

        self.recorder
            .record(
                actor,
                AuditAction::CategoryDeleted,
                &format!("Category {category_id} deleted"),
            )
            .await?;

        tracing::info!(category_id = %category_id, "Category deleted");

        Ok(())
    }
}
