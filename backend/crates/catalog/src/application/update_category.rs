//! Update Category Use Case

use std::sync::Arc;

use audit::{AuditAction, AuditRecorder, AuditRepository};
use kernel::id::{CategoryId, UserId};
use validator::Validate;

use crate::application::create_category::CategoryInput;
use crate::domain::repository::CategoryRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct UpdateCategoryUseCase<C, A>
where
    C: CategoryRepository,
    A: AuditRepository,
{
    category_repo: Arc<C>,
    recorder: AuditRecorder<A>,
}

impl<C, A> UpdateCategoryUseCase<C, A>
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

    pub async fn execute(
        &self,
        actor: UserId,
        category_id: CategoryId,
        input: CategoryInput,
    ) -> CatalogResult<()> {
        let input = input.trimmed();
        input.validate()?;
        let name = input.name.as_str();

        if self.category_repo.find_by_id(category_id).await?.is_none() {
            return Err(CatalogError::CategoryNotFound);
        }
        if self
            .category_repo
            .exists_by_name(name, Some(category_id))
            .await?
        {
            return Err(CatalogError::CategoryNameTaken);
        }
        if !self.category_repo.rename(category_id, name).await? {
            return Err(CatalogError::CategoryNotFound);
        }

        self.recorder
            .record(
                actor,
                AuditAction::CategoryUpdated,
                &format!("Category {category_id} renamed to {name}"),
            )
            .await?;

        tracing::info!(category_id = %category_id, "Category updated");

        Ok(())
    }
}
