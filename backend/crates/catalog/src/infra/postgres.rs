//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::is_unique_violation;
use kernel::id::{CategoryId, ProductId, UserId};
use sqlx::PgPool;

use crate::domain::entity::{Category, Product, ProductDraft};
use crate::domain::repository::{CategoryRepository, ProductRepository};
use crate::error::{CatalogError, CatalogResult};

/// Product columns plus the aggregated category links
const PRODUCT_SELECT: &str = r#"
    SELECT p.id, p.name, p.description, p.price, p.stock, p.created_by, p.created_at,
           COALESCE(
               ARRAY_AGG(pc.category_id ORDER BY pc.category_id)
                   FILTER (WHERE pc.category_id IS NOT NULL),
               '{}'
           ) AS category_ids
    FROM products p
    LEFT JOIN product_on_category pc ON pc.product_id = p.id
"#;

/// PostgreSQL-backed category and product repository
#[derive(Clone)]
pub struct PgCatalogRepository {
    pool: PgPool,
}

impl PgCatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn category_conflict(e: sqlx::Error) -> CatalogError {
    if is_unique_violation(&e) {
        CatalogError::CategoryNameTaken
    } else {
        CatalogError::Database(e)
    }
}

fn product_conflict(e: sqlx::Error) -> CatalogError {
    if is_unique_violation(&e) {
        CatalogError::ProductNameTaken
    } else {
        CatalogError::Database(e)
    }
}

fn raw_ids(ids: &[CategoryId]) -> Vec<i64> {
    ids.iter().map(|id| id.value()).collect()
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgCatalogRepository {
    async fn create(&self, name: &str, created_by: UserId) -> CatalogResult<Category> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, created_by)
            VALUES ($1, $2)
            RETURNING id, name, created_by, created_at
            "#,
        )
        .bind(name)
        .bind(created_by.value())
        .fetch_one(&self.pool)
        .await
        .map_err(category_conflict)?;

        Ok(row.into_category())
    }

    async fn find_by_id(&self, category_id: CategoryId) -> CatalogResult<Option<Category>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, created_by, created_at FROM categories WHERE id = $1",
        )
        .bind(category_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CategoryRow::into_category))
    }

    async fn list(&self) -> CatalogResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, created_by, created_at FROM categories ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }

    async fn exists_by_name(
        &self,
        name: &str,
        exclude: Option<CategoryId>,
    ) -> CatalogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM categories
                WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude.map(|id| id.value()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn rename(&self, category_id: CategoryId, name: &str) -> CatalogResult<bool> {
        let result = sqlx::query("UPDATE categories SET name = $2 WHERE id = $1")
            .bind(category_id.value())
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(category_conflict)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, category_id: CategoryId) -> CatalogResult<bool> {
        // Links go with the category (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(category_id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_missing(&self, ids: &[CategoryId]) -> CatalogResult<Vec<CategoryId>> {
        let missing = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT wanted.id
            FROM UNNEST($1::BIGINT[]) AS wanted(id)
            WHERE NOT EXISTS (SELECT 1 FROM categories c WHERE c.id = wanted.id)
            ORDER BY wanted.id
            "#,
        )
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await?;

        Ok(missing.into_iter().map(CategoryId::from_raw).collect())
    }
}

// ============================================================================
// Product Repository Implementation
// ============================================================================

impl ProductRepository for PgCatalogRepository {
    async fn create(&self, draft: &ProductDraft, created_by: UserId) -> CatalogResult<Product> {
        let mut tx = self.pool.begin().await?;

        let product_id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO products (name, description, price, stock, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.stock)
        .bind(created_by.value())
        .fetch_one(&mut *tx)
        .await
        .map_err(product_conflict)?;

        sqlx::query(
            r#"
            INSERT INTO product_on_category (product_id, category_id)
            SELECT $1, UNNEST($2::BIGINT[])
            "#,
        )
        .bind(product_id)
        .bind(raw_ids(&draft.category_ids))
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "{PRODUCT_SELECT} WHERE p.id = $1 GROUP BY p.id"
        ))
        .bind(product_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into_product())
    }

    async fn find_by_id(&self, product_id: ProductId) -> CatalogResult<Option<Product>> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "{PRODUCT_SELECT} WHERE p.id = $1 GROUP BY p.id"
        ))
        .bind(product_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ProductRow::into_product))
    }

    async fn list(&self) -> CatalogResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "{PRODUCT_SELECT} GROUP BY p.id ORDER BY p.id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ProductRow::into_product).collect())
    }

    async fn exists_by_name(&self, name: &str, exclude: Option<ProductId>) -> CatalogResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM products
                WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            )
            "#,
        )
        .bind(name)
        .bind(exclude.map(|id| id.value()))
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn update(&self, product_id: ProductId, draft: &ProductDraft) -> CatalogResult<bool> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4, stock = $5
            WHERE id = $1
            "#,
        )
        .bind(product_id.value())
        .bind(&draft.name)
        .bind(&draft.description)
        .bind(draft.price)
        .bind(draft.stock)
        .execute(&mut *tx)
        .await
        .map_err(product_conflict)?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM product_on_category WHERE product_id = $1")
            .bind(product_id.value())
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO product_on_category (product_id, category_id)
            SELECT $1, UNNEST($2::BIGINT[])
            "#,
        )
        .bind(product_id.value())
        .bind(raw_ids(&draft.category_ids))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(true)
    }

    async fn delete(&self, product_id: ProductId) -> CatalogResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(product_id.value())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn set_stock(&self, product_id: ProductId, stock: i32) -> CatalogResult<bool> {
        let result = sqlx::query("UPDATE products SET stock = $2 WHERE id = $1")
            .bind(product_id.value())
            .bind(stock)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    name: String,
    created_by: i64,
    created_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: CategoryId::from_raw(self.id),
            name: self.name,
            created_by: UserId::from_raw(self.created_by),
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: String,
    price: f64,
    stock: i32,
    created_by: i64,
    created_at: DateTime<Utc>,
    category_ids: Vec<i64>,
}

impl ProductRow {
    fn into_product(self) -> Product {
        Product {
            id: ProductId::from_raw(self.id),
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
            category_ids: self
                .category_ids
                .into_iter()
                .map(CategoryId::from_raw)
                .collect(),
            created_by: UserId::from_raw(self.created_by),
            created_at: self.created_at,
        }
    }
}
