//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::{CategoryInput, ProductInput, StockInput};
use crate::domain::entity::{Category, Product};

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryRequest {
    #[serde(default)]
    pub name: String,
}

impl From<CategoryRequest> for CategoryInput {
    fn from(req: CategoryRequest) -> Self {
        Self { name: req.name }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.value(),
            name: category.name,
            created_by: category.created_by.value(),
            created_at: category.created_at,
        }
    }
}

// ============================================================================
// Products
// ============================================================================

/// Body for product create and full update.
/// `categoryId` is the field name existing clients send.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: f64,
    pub stock: Option<i32>,
    #[serde(default, alias = "categoryIds")]
    pub category_id: Vec<i64>,
}

impl From<ProductRequest> for ProductInput {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
            stock: req.stock,
            category_ids: req.category_id,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StockRequest {
    pub stock: Option<i32>,
}

impl From<StockRequest> for StockInput {
    fn from(req: StockRequest) -> Self {
        Self { stock: req.stock }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub category_ids: Vec<i64>,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.value(),
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category_ids: product.category_ids.iter().map(|id| id.value()).collect(),
            created_by: product.created_by.value(),
            created_at: product.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_request_accepts_both_link_field_names() {
        let legacy: ProductRequest = serde_json::from_str(
            r#"{"name":"Boots","description":"Leather","price":120.5,"stock":3,"categoryId":[1,2]}"#,
        )
        .unwrap();
        let plural: ProductRequest =
            serde_json::from_str(r#"{"name":"Boots","categoryIds":[2]}"#).unwrap();

        assert_eq!(legacy.category_id, vec![1, 2]);
        assert_eq!(legacy.stock, Some(3));
        assert_eq!(plural.category_id, vec![2]);
        assert_eq!(plural.stock, None);
    }

    #[test]
    fn test_missing_fields_fall_through_to_validation() {
        let req: ProductRequest = serde_json::from_str("{}").unwrap();
        let input = ProductInput::from(req);

        assert!(input.name.is_empty());
        assert_eq!(input.price, 0.0);
        assert!(input.category_ids.is_empty());
    }
}
