//! Update Product Use Case
//!
//! Full overwrite: every field is replaced and the category links are
//! replaced with the submitted set.

use std::sync::Arc;

use audit::{AuditAction, AuditRecorder, AuditRepository};
use kernel::id::{ProductId, UserId};
use validator::Validate;

use crate::application::create_product::{ProductInput, ensure_categories_exist};
use crate::domain::repository::{CategoryRepository, ProductRepository};
use crate::error::{CatalogError, CatalogResult};

pub struct UpdateProductUseCase<P, C, A>
where
    P: ProductRepository,
    C: CategoryRepository,
    A: AuditRepository,
{
    product_repo: Arc<P>,
    category_repo: Arc<C>,
    recorder: AuditRecorder<A>,
}

impl<P, C, A> UpdateProductUseCase<P, C, A>
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

    pub async fn execute(
        &self,
        actor: UserId,
        product_id: ProductId,
        input: ProductInput,
    ) -> CatalogResult<()> {
        let input = input.trimmed();
        input.validate()?;
        let draft = input.into_draft();

        if self.product_repo.find_by_id(product_id).await?.is_none() {
            return Err(CatalogError::ProductNotFound);
        }
        if self
            .product_repo
            .exists_by_name(&draft.name, Some(product_id))
            .await?
        {
            return Err(CatalogError::ProductNameTaken);
        }
        ensure_categories_exist(self.category_repo.as_ref(), &draft).await?;

        if !self.product_repo.update(product_id, &draft).await? {
            return Err(CatalogError::ProductNotFound);
        }

        self.recorder
            .record(
                actor,
                AuditAction::ProductUpdated,
                &format!("Product {product_id} updated"),
            )
            .await?;

        tracing::info!(product_id = %product_id, "Product updated");

        Ok(())
    }
}
