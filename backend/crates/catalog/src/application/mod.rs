//! Application Layer
//!
//! Use cases for categories and products.

pub mod create_category;
pub mod create_product;
pub mod delete_category;
pub mod delete_product;
pub mod queries;
pub mod update_category;
pub mod update_product;
pub mod update_stock;

// Re-exports
pub use create_category::{CategoryInput, CreateCategoryUseCase};
pub use create_product::{CreateProductUseCase, ProductInput};
pub use delete_category::DeleteCategoryUseCase;
pub use delete_product::DeleteProductUseCase;
pub use queries::{GetCategoryUseCase, GetProductUseCase, ListCategoriesUseCase, ListProductsUseCase};
pub use update_category::UpdateCategoryUseCase;
pub use update_product::UpdateProductUseCase;
pub use update_stock::{StockInput, UpdateStockUseCase};
