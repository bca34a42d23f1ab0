//! Update Stock Use Case

use std::sync::Arc;

use audit::{AuditAction, AuditRecorder, AuditRepository};
use kernel::id::{ProductId, UserId};
use validator::Validate;

use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

#[derive(Debug, Clone, Validate)]
pub struct StockInput {
    #[validate(
        required(message = "Stock is required"),
        range(min = 0, message = "Stock cannot be negative")
    )]
    pub stock: Option<i32>,
}

pub struct UpdateStockUseCase<P, A>
where
    P: ProductRepository,
    A: AuditRepository,
{
    product_repo: Arc<P>,
    recorder: AuditRecorder<A>,
}

impl<P, A> UpdateStockUseCase<P, A>
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

    pub async fn execute(
        &self,
        actor: UserId,
        product_id: ProductId,
        input: StockInput,
    ) -> CatalogResult<()> {
        input.validate()?;
        let stock = input.stock.unwrap_or_default();

        if !self.product_repo.set_stock(product_id, stock).await? {
            return Err(CatalogError::ProductNotFound);
        }

        self.recorder
            .record(
                actor,
                AuditAction::ProductStockUpdated,
                &format!("Product {product_id} stock set to {stock}"),
            )
            .await?;

        tracing::info!(product_id = %product_id, stock, "Product stock updated");

        Ok(())
    }
}
