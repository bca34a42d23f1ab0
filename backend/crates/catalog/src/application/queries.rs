//! Read-only catalog use cases

use std::sync::Arc;

use kernel::id::{CategoryId, ProductId};

use crate::domain::entity::{Category, Product};
use crate::domain::repository::{CategoryRepository, ProductRepository};
use crate::error::{CatalogError, CatalogResult};

pub struct GetCategoryUseCase<C: CategoryRepository> {
    category_repo: Arc<C>,
}

impl<C: CategoryRepository> GetCategoryUseCase<C> {
    pub fn new(category_repo: Arc<C>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(&self, category_id: CategoryId) -> CatalogResult<Category> {
        self.category_repo
            .find_by_id(category_id)
            .await?
            .ok_or(CatalogError::CategoryNotFound)
    }
}

pub struct ListCategoriesUseCase<C: CategoryRepository> {
    category_repo: Arc<C>,
}

impl<C: CategoryRepository> ListCategoriesUseCase<C> {
    pub fn new(category_repo: Arc<C>) -> Self {
        Self { category_repo }
    }

    pub async fn execute(&self) -> CatalogResult<Vec<Category>> {
        self.category_repo.list().await
    }
}

pub struct GetProductUseCase<P: ProductRepository> {
    product_repo: Arc<P>,
}

impl<P: ProductRepository> GetProductUseCase<P> {
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self, product_id: ProductId) -> CatalogResult<Product> {
        self.product_repo
            .find_by_id(product_id)
            .await?
            .ok_or(CatalogError::ProductNotFound)
    }
}

pub struct ListProductsUseCase<P: ProductRepository> {
    product_repo: Arc<P>,
}

impl<P: ProductRepository> ListProductsUseCase<P> {
    pub fn new(product_repo: Arc<P>) -> Self {
        Self { product_repo }
    }

    pub async fn execute(&self) -> CatalogResult<Vec<Product>> {
        self.product_repo.list().await
    }
}
