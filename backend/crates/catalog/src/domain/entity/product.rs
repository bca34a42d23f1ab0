//! Product Entity

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, ProductId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    /// Linked categories, ascending
    pub category_ids: Vec<CategoryId>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Validated field set written on create and full update.
/// An update replaces the product's category links with `category_ids`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub category_ids: Vec<CategoryId>,
}

impl ProductDraft {
    pub fn new(
        name: &str,
        description: &str,
        price: f64,
        stock: i32,
        category_ids: &[i64],
    ) -> Self {
        let mut ids: Vec<i64> = category_ids.to_vec();
        ids.sort_unstable();
        ids.dedup();

        Self {
            name: name.trim().to_string(),
            description: description.trim().to_string(),
            price,
            stock,
            category_ids: ids.into_iter().map(CategoryId::from_raw).collect(),
        }
    }
}
