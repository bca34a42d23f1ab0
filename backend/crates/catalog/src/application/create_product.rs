//! Create Product Use Case

use std::sync::Arc;

use audit::{AuditAction, AuditRecorder, AuditRepository};
use kernel::id::UserId;
use kernel::validation::{not_blank, positive_amount, positive_ids};
use validator::Validate;

use crate::domain::entity::{Product, ProductDraft};
use crate::domain::repository::{CategoryRepository, ProductRepository};
use crate::error::{CatalogError, CatalogResult};

/// Product fields for create and full update
#[derive(Debug, Clone, Validate)]
pub struct ProductInput {
    #[validate(
        length(min = 1, max = 100, message = "Name must be 1-100 characters"),
        custom(function = "not_blank")
    )]
    pub name: String,
    #[validate(
        length(min = 1, message = "Description is required"),
        custom(function = "not_blank")
    )]
    pub description: String,
    #[validate(custom(function = "positive_amount"))]
    pub price: f64,
    #[validate(
        required(message = "Stock is required"),
        range(min = 0, message = "Stock cannot be negative")
    )]
    pub stock: Option<i32>,
    #[validate(custom(function = "positive_ids"))]
    pub category_ids: Vec<i64>,
}

impl ProductInput {
    /// Call after `validate()`; `stock` is present by then
    pub(crate) fn into_draft(self) -> ProductDraft {
        ProductDraft::new(
            &self.name,
            &self.description,
            self.price,
            self.stock.unwrap_or_default(),
            &self.category_ids,
        )
    }
}

/// Fail with the ids that have no category row, if any
pub(crate) async fn ensure_categories_exist<C: CategoryRepository>(
    category_repo: &C,
    draft: &ProductDraft,
) -> CatalogResult<()> {
    if draft.category_ids.is_empty() {
        return Ok(());
    }
    let missing = category_repo.find_missing(&draft.category_ids).await?;
    if !missing.is_empty() {
        return Err(CatalogError::UnknownCategories(missing));
    }
    Ok(())
}

pub struct CreateProductUseCase<P, C, A>
where
    P: ProductRepository,
    C: CategoryRepository,
    A: AuditRepository,
{
    product_repo: Arc<P>,
    category_repo: Arc<C>,
    recorder: AuditRecorder<A>,
}

impl<P, C, A> CreateProductUseCase<P, C, A>
where
    P: ProductRepository,
    C: CategoryRepository + Sync,
    A: AuditRepository,
{
    pub fn new(product_repo: Arc<P>, category_repo: Arc<C>, recorder: AuditRecorder<A>) -> Self {
        Self {
            product_repo,
            category_repo,
            recorder,
        }
    }

    pub async fn execute(&self, actor: UserId, input: ProductInput) -> CatalogResult<Product> {
        let input = input.trimmed();
        input.validate()?;
        let draft = input.into_draft();

        if self.product_repo.exists_by_name(&draft.name, None).await? {
            return Err(CatalogError::ProductNameTaken);
        }
        ensure_categories_exist(self.category_repo.as_ref(), &draft).await?;

        let product = self.product_repo.create(&draft, actor).await?;

        self.recorder
            .record(
                actor,
                AuditAction::ProductCreated,
                &format!("Product {} created", product.name),
            )
            .await?;

        tracing::info!(
            product_id = %product.id,
            categories = product.category_ids.len(),
            "Product created"
        );

        Ok(product)
    }
}
