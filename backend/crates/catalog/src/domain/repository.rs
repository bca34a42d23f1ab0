//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{CategoryId, ProductId, UserId};

use crate::domain::entity::{Category, Product, ProductDraft};
use crate::error::CatalogResult;

/// Category repository trait
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    async fn create(&self, name: &str, created_by: UserId) -> CatalogResult<Category>;

    async fn find_by_id(&self, category_id: CategoryId) -> CatalogResult<Option<Category>>;

    /// All categories, oldest first
    async fn list(&self) -> CatalogResult<Vec<Category>>;

    /// Check whether a category other than `exclude` already uses `name`
    async fn exists_by_name(&self, name: &str, exclude: Option<CategoryId>)
    -> CatalogResult<bool>;

    /// Returns `false` when the category does not exist
    async fn rename(&self, category_id: CategoryId, name: &str) -> CatalogResult<bool>;

    /// Remove a category and its product links.
    /// Returns `false` when the category does not exist.
    async fn delete(&self, category_id: CategoryId) -> CatalogResult<bool>;

    /// Subset of `ids` with no category row
    async fn find_missing(&self, ids: &[CategoryId]) -> CatalogResult<Vec<CategoryId>>;
}

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Insert the product and its category links atomically
    async fn create(&self, draft: &ProductDraft, created_by: UserId) -> CatalogResult<Product>;

    async fn find_by_id(&self, product_id: ProductId) -> CatalogResult<Option<Product>>;

    /// All products, oldest first
    async fn list(&self) -> CatalogResult<Vec<Product>>;

    async fn exists_by_name(&self, name: &str, exclude: Option<ProductId>) -> CatalogResult<bool>;

    /// Overwrite fields and replace category links atomically.
    /// Returns `false` when the product does not exist.
    async fn update(&self, product_id: ProductId, draft: &ProductDraft) -> CatalogResult<bool>;

    /// Returns `false` when the product does not exist
    async fn delete(&self, product_id: ProductId) -> CatalogResult<bool>;

    /// Returns `false` when the product does not exist
    async fn set_stock(&self, product_id: ProductId, stock: i32) -> CatalogResult<bool>;
}
