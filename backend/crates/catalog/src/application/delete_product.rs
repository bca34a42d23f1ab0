//! Delete Product Use Case

use std::sync::Arc;

use audit::{AuditAction, AuditRecorder, AuditRepository};
use kernel::id::{ProductId, UserId};

use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct DeleteProductUseCase<P, A>
where
    P: ProductRepository,
    A: AuditRepository,
{
    product_repo: Arc<P>,
    recorder: AuditRecorder<A>,
}

impl<P, A> DeleteProductUseCase<P, A>
where
    P: ProductRepository,
    A: AuditRepository,
{
    pub fn new(product_repo: Arc<P>, recorder: AuditRecorder<A>) -> Self {
        Self {
            product_repo,
            recorder,
        }
    }

    pub async fn execute(&self, actor: UserId, product_id: ProductId) -> CatalogResult<()> {
        if !self.product_repo.delete(product_id).await? {
            return Err(CatalogError::ProductNotFound);
        }

        self.recorder
            .record(
                actor,
                AuditAction::ProductDeleted,
                &format!("Product {product_id} deleted"),
            )
            .await?;

        tracing::info!(product_id = %product_id, "Product deleted");

        Ok(())
    }
}
