//! Create Category Use Case

use std::sync::Arc;

use audit::{AuditAction, AuditRecorder, AuditRepository};
use kernel::id::UserId;
use kernel::validation::not_blank;
use validator::Validate;

use crate::domain::entity::Category;
use crate::domain::repository::CategoryRepository;
use crate::error::{CatalogError, CatalogResult};

/// Category fields for create and update
#[derive(Debug, Clone, Validate)]
pub struct CategoryInput {
    #[validate(
        length(min = 3, max = 50, message = "Name must be 3-50 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
}

impl CategoryInput {
    /// Surrounding whitespace is dropped before the length rules apply
    pub(crate) fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
        }
    }
}

pub struct CreateCategoryUseCase<C, A>
where
    C: CategoryRepository,
    A: AuditRepository,
{
    category_repo: Arc<C>,
    recorder: AuditRecorder<A>,
}

impl<C, A> CreateCategoryUseCase<C, A>
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

    pub async fn execute(&self, actor: UserId, input: CategoryInput) -> CatalogResult<Category> {
        let input = input.trimmed();
        input.validate()?;
        let name = input.name.as_str();

        if self.category_repo.exists_by_name(name, None).await? {
            return Err(CatalogError::CategoryNameTaken);
        }

        let category = self.category_repo.create(name, actor).await?;

        self.recorder
            .record(
                actor,
                AuditAction::CategoryCreated,
                &format!("Category {} created", category.name),
            )
            .await?;

        tracing::info!(category_id = %category.id, "Category created");

        Ok(category)
    }
}
