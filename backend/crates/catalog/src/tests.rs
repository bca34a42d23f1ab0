//! Unit tests for the catalog crate
//!
//! Use cases and the router run against an in-memory catalog store and
//! audit repository.

#[cfg(test)]
mod fakes {
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use audit::{AuditError, AuditLog, AuditRepository, AuditResult, NewAuditEntry};
    use chrono::Utc;
    use kernel::id::{AuditEntryId, CategoryId, ProductId, UserId};

    use crate::domain::entity::{Category, Product, ProductDraft};
    use crate::domain::repository::{CategoryRepository, ProductRepository};
    use crate::error::CatalogResult;

    pub const MANAGER_ID: i64 = 2;

    #[derive(Default)]
    struct StoreInner {
        categories: BTreeMap<i64, Category>,
        products: BTreeMap<i64, Product>,
        next_category: i64,
        next_product: i64,
    }

    #[derive(Clone, Default)]
    pub struct MemoryCatalog {
        inner: Arc<Mutex<StoreInner>>,
    }

    impl MemoryCatalog {
        pub fn product(&self, id: i64) -> Option<Product> {
            self.inner.lock().unwrap().products.get(&id).cloned()
        }

        pub fn category_count(&self) -> usize {
            self.inner.lock().unwrap().categories.len()
        }
    }

    impl CategoryRepository for MemoryCatalog {
        async fn create(&self, name: &str, created_by: UserId) -> CatalogResult<Category> {
            let mut inner = self.inner.lock().unwrap();
            inner.next_category += 1;
            let category = Category {
                id: CategoryId::from_raw(inner.next_category),
                name: name.to_string(),
                created_by,
                created_at: Utc::now(),
            };
            inner
                .categories
                .insert(category.id.value(), category.clone());
            Ok(category)
        }

        async fn find_by_id(&self, category_id: CategoryId) -> CatalogResult<Option<Category>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.categories.get(&category_id.value()).cloned())
        }

        async fn list(&self) -> CatalogResult<Vec<Category>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.categories.values().cloned().collect())
        }

        async fn exists_by_name(
            &self,
            name: &str,
            exclude: Option<CategoryId>,
        ) -> CatalogResult<bool> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .categories
                .values()
                .any(|c| c.name == name && Some(c.id) != exclude))
        }

        async fn rename(&self, category_id: CategoryId, name: &str) -> CatalogResult<bool> {
            let mut inner = self.inner.lock().unwrap();
            match inner.categories.get_mut(&category_id.value()) {
                Some(category) => {
                    category.name = name.to_string();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, category_id: CategoryId) -> CatalogResult<bool> {
            let mut inner = self.inner.lock().unwrap();
            if inner.categories.remove(&category_id.value()).is_none() {
                return Ok(false);
            }
            for product in inner.products.values_mut() {
                product.category_ids.retain(|id| *id != category_id);
            }
            Ok(true)
        }

        async fn find_missing(&self, ids: &[CategoryId]) -> CatalogResult<Vec<CategoryId>> {
            let inner = self.inner.lock().unwrap();
            Ok(ids
                .iter()
                .filter(|id| !inner.categories.contains_key(&id.value()))
                .copied()
                .collect())
        }
    }

    impl ProductRepository for MemoryCatalog {
        async fn create(&self, draft: &ProductDraft, created_by: UserId) -> CatalogResult<Product> {
            let mut inner = self.inner.lock().unwrap();
            inner.next_product += 1;
            let product = Product {
                id: ProductId::from_raw(inner.next_product),
                name: draft.name.clone(),
                description: draft.description.clone(),
                price: draft.price,
                stock: draft.stock,
                category_ids: draft.category_ids.clone(),
                created_by,
                created_at: Utc::now(),
            };
            inner.products.insert(product.id.value(), product.clone());
            Ok(product)
        }

        async fn find_by_id(&self, product_id: ProductId) -> CatalogResult<Option<Product>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.products.get(&product_id.value()).cloned())
        }

        async fn list(&self) -> CatalogResult<Vec<Product>> {
            let inner = self.inner.lock().unwrap();
            Ok(inner.products.values().cloned().collect())
        }

        async fn exists_by_name(
            &self,
            name: &str,
            exclude: Option<ProductId>,
        ) -> CatalogResult<bool> {
            let inner = self.inner.lock().unwrap();
            Ok(inner
                .products
                .values()
                .any(|p| p.name == name && Some(p.id) != exclude))
        }

        async fn update(&self, product_id: ProductId, draft: &ProductDraft) -> CatalogResult<bool> {
            let mut inner = self.inner.lock().unwrap();
            match inner.products.get_mut(&product_id.value()) {
                Some(product) => {
                    product.name = draft.name.clone();
                    product.description = draft.description.clone();
                    product.price = draft.price;
                    product.stock = draft.stock;
                    product.category_ids = draft.category_ids.clone();
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        async fn delete(&self, product_id: ProductId) -> CatalogResult<bool> {
            let mut inner = self.inner.lock().unwrap();
            Ok(inner.products.remove(&product_id.value()).is_some())
        }

        async fn set_stock(&self, product_id: ProductId, stock: i32) -> CatalogResult<bool> {
            let mut inner = self.inner.lock().unwrap();
            match inner.products.get_mut(&product_id.value()) {
                Some(product) => {
                    product.stock = stock;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    #[derive(Clone, Default)]
    pub struct MemoryAudit {
        pub entries: Arc<Mutex<Vec<NewAuditEntry>>>,
        pub fail_writes: Arc<AtomicBool>,
    }

    impl MemoryAudit {
        pub fn details(&self) -> Vec<String> {
            let entries = self.entries.lock().unwrap();
            entries.iter().map(|e| e.details.clone()).collect()
        }
    }

    impl AuditRepository for MemoryAudit {
        async fn find_actor_name(&self, user_id: UserId) -> AuditResult<Option<String>> {
            Ok((user_id.value() == MANAGER_ID).then(|| "Mona Manager".to_string()))
        }

        async fn append(&self, entry: &NewAuditEntry) -> AuditResult<AuditEntryId> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(AuditError::Database(sqlx::Error::PoolTimedOut));
            }
            let mut entries = self.entries.lock().unwrap();
            entries.push(entry.clone());
            Ok(AuditEntryId::from_raw(entries.len() as i64))
        }

        async fn list(&self) -> AuditResult<Vec<AuditLog>> {
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod use_case_tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use audit::{AuditAction, AuditRecorder};
    use kernel::error::kind::ErrorKind;
    use kernel::id::{CategoryId, ProductId, UserId};

    use super::fakes::*;
    use crate::application::*;
    use crate::error::CatalogError;

    struct Harness {
        store: Arc<MemoryCatalog>,
        audit: Arc<MemoryAudit>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                store: Arc::new(MemoryCatalog::default()),
                audit: Arc::new(MemoryAudit::default()),
            }
        }

        fn recorder(&self) -> AuditRecorder<MemoryAudit> {
            AuditRecorder::new(self.audit.clone())
        }

        fn manager(&self) -> UserId {
            UserId::from_raw(MANAGER_ID)
        }

        async fn category(&self, name: &str) -> CategoryId {
            CreateCategoryUseCase::new(self.store.clone(), self.recorder())
                .execute(
                    self.manager(),
                    CategoryInput {
                        name: name.to_string(),
                    },
                )
                .await
                .unwrap()
                .id
        }

        async fn create_product(&self, input: ProductInput) -> Result<ProductId, CatalogError> {
            CreateProductUseCase::new(self.store.clone(), self.store.clone(), self.recorder())
                .execute(self.manager(), input)
                .await
                .map(|p| p.id)
        }
    }

    fn boots(category_ids: Vec<i64>) -> ProductInput {
        ProductInput {
            name: "Boots".to_string(),
            description: "Leather boots".to_string(),
            price: 120.5,
            stock: Some(4),
            category_ids,
        }
    }

    #[tokio::test]
    async fn test_category_lifecycle_is_audited() {
        let h = Harness::new();
        let shoes = h.category("Shoes").await;

        UpdateCategoryUseCase::new(h.store.clone(), h.recorder())
            .execute(
                h.manager(),
                shoes,
                CategoryInput {
                    name: "Footwear".to_string(),
                },
            )
            .await
            .unwrap();

        let fetched = GetCategoryUseCase::new(h.store.clone())
            .execute(shoes)
            .await
            .unwrap();
        assert_eq!(fetched.name, "Footwear");
        assert_eq!(fetched.created_by, h.manager());

        DeleteCategoryUseCase::new(h.store.clone(), h.recorder())
            .execute(h.manager(), shoes)
            .await
            .unwrap();
        assert_eq!(h.store.category_count(), 0);

        let entries = h.audit.entries.lock().unwrap().clone();
        let actions: Vec<AuditAction> = entries.iter().map(|e| e.action).collect();
        assert_eq!(
            actions,
            vec![
                AuditAction::CategoryCreated,
                AuditAction::CategoryUpdated,
                AuditAction::CategoryDeleted,
            ]
        );
        assert!(entries[0].details.contains("Mona Manager"));
    }

    #[tokio::test]
    async fn test_category_name_rules() {
        let h = Harness::new();
        h.category("Shoes").await;
        let hats = h.category("Hats").await;
        let create = CreateCategoryUseCase::new(h.store.clone(), h.recorder());

        let err = create
            .execute(
                h.manager(),
                CategoryInput {
                    name: "Shoes".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CategoryNameTaken));

        let err = create
            .execute(
                h.manager(),
                CategoryInput {
                    name: "ab".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let update = UpdateCategoryUseCase::new(h.store.clone(), h.recorder());
        let err = update
            .execute(
                h.manager(),
                hats,
                CategoryInput {
                    name: "Shoes".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CategoryNameTaken));

        // Keeping its own name is not a conflict
        update
            .execute(
                h.manager(),
                hats,
                CategoryInput {
                    name: "Hats".to_string(),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_category_name_length_ignores_padding() {
        let h = Harness::new();
        let hats = h.category("Hats").await;
        let padded = || CategoryInput {
            name: "  ab  ".to_string(),
        };

        let err = CreateCategoryUseCase::new(h.store.clone(), h.recorder())
            .execute(h.manager(), padded())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));
        assert_eq!(h.store.category_count(), 1);

        let err = UpdateCategoryUseCase::new(h.store.clone(), h.recorder())
            .execute(h.manager(), hats, padded())
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let caps = h.category("  Caps  ").await;
        let get = GetCategoryUseCase::new(h.store.clone());
        assert_eq!(get.execute(hats).await.unwrap().name, "Hats");
        assert_eq!(get.execute(caps).await.unwrap().name, "Caps");
    }

    #[tokio::test]
    async fn test_missing_category_is_not_found() {
        let h = Harness::new();
        let missing = CategoryId::from_raw(42);

        let err = GetCategoryUseCase::new(h.store.clone())
            .execute(missing)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CategoryNotFound));

        let err = DeleteCategoryUseCase::new(h.store.clone(), h.recorder())
            .execute(h.manager(), missing)
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::CategoryNotFound));
        assert!(h.audit.details().is_empty());
    }

    #[tokio::test]
    async fn test_product_links_categories() {
        let h = Harness::new();
        let shoes = h.category("Shoes").await;
        let sale = h.category("Sale").await;

        let id = h
            .create_product(boots(vec![sale.value(), shoes.value(), sale.value()]))
            .await
            .unwrap();

        let product = GetProductUseCase::new(h.store.clone())
            .execute(id)
            .await
            .unwrap();
        assert_eq!(product.category_ids, vec![shoes, sale]);
        assert_eq!(product.stock, 4);
        assert_eq!(h.audit.details()[2], "Product Boots created, performed by Mona Manager");
    }

    #[tokio::test]
    async fn test_product_with_unknown_category_is_rejected() {
        let h = Harness::new();
        let shoes = h.category("Shoes").await;

        let err = h
            .create_product(boots(vec![shoes.value(), 9, 4]))
            .await
            .unwrap_err();

        match err {
            CatalogError::UnknownCategories(ids) => {
                assert_eq!(ids, vec![CategoryId::from_raw(4), CategoryId::from_raw(9)]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(ListProductsUseCase::new(h.store.clone())
            .execute()
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_product_field_validation() {
        let h = Harness::new();

        let mut zero_price = boots(vec![]);
        zero_price.price = 0.0;
        assert!(matches!(
            h.create_product(zero_price).await.unwrap_err(),
            CatalogError::Validation(_)
        ));

        let mut negative_stock = boots(vec![]);
        negative_stock.stock = Some(-1);
        assert!(matches!(
            h.create_product(negative_stock).await.unwrap_err(),
            CatalogError::Validation(_)
        ));

        let mut no_stock = boots(vec![]);
        no_stock.stock = None;
        assert!(matches!(
            h.create_product(no_stock).await.unwrap_err(),
            CatalogError::Validation(_)
        ));

        let mut blank_description = boots(vec![]);
        blank_description.description = "   ".to_string();
        assert!(matches!(
            h.create_product(blank_description).await.unwrap_err(),
            CatalogError::Validation(_)
        ));

        let mut bad_link = boots(vec![]);
        bad_link.category_ids = vec![0];
        assert!(matches!(
            h.create_product(bad_link).await.unwrap_err(),
            CatalogError::Validation(_)
        ));

        let mut empty_stock = boots(vec![]);
        empty_stock.stock = Some(0);
        h.create_product(empty_stock).await.unwrap();
    }

    #[tokio::test]
    async fn test_product_name_length_ignores_padding() {
        let h = Harness::new();

        let mut long = boots(vec![]);
        long.name = format!("  {}  ", "x".repeat(101));
        assert!(matches!(
            h.create_product(long).await.unwrap_err(),
            CatalogError::Validation(_)
        ));

        let mut padded = boots(vec![]);
        padded.name = format!("  {}  ", "y".repeat(100));
        padded.description = "  Leather boots  ".to_string();
        let id = h.create_product(padded).await.unwrap();

        let product = GetProductUseCase::new(h.store.clone())
            .execute(id)
            .await
            .unwrap();
        assert_eq!(product.name.len(), 100);
        assert_eq!(product.description, "Leather boots");
    }

    #[tokio::test]
    async fn test_duplicate_product_name_conflicts() {
        let h = Harness::new();
        h.create_product(boots(vec![])).await.unwrap();

        let err = h.create_product(boots(vec![])).await.unwrap_err();
        assert!(matches!(err, CatalogError::ProductNameTaken));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    #[tokio::test]
    async fn test_product_update_replaces_links() {
        let h = Harness::new();
        let shoes = h.category("Shoes").await;
        let sale = h.category("Sale").await;
        let id = h.create_product(boots(vec![shoes.value()])).await.unwrap();

        let mut input = boots(vec![sale.value()]);
        input.name = "Winter Boots".to_string();
        input.price = 99.0;
        UpdateProductUseCase::new(h.store.clone(), h.store.clone(), h.recorder())
            .execute(h.manager(), id, input)
            .await
            .unwrap();

        let product = h.store.product(id.value()).unwrap();
        assert_eq!(product.name, "Winter Boots");
        assert_eq!(product.price, 99.0);
        assert_eq!(product.category_ids, vec![sale]);
    }

    #[tokio::test]
    async fn test_update_missing_product_is_not_found() {
        let h = Harness::new();

        let err = UpdateProductUseCase::new(h.store.clone(), h.store.clone(), h.recorder())
            .execute(h.manager(), ProductId::from_raw(5), boots(vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ProductNotFound));
    }

    #[tokio::test]
    async fn test_stock_update() {
        let h = Harness::new();
        let id = h.create_product(boots(vec![])).await.unwrap();
        let use_case = UpdateStockUseCase::new(h.store.clone(), h.recorder());

        use_case
            .execute(h.manager(), id, StockInput { stock: Some(0) })
            .await
            .unwrap();
        assert_eq!(h.store.product(id.value()).unwrap().stock, 0);

        let err = use_case
            .execute(h.manager(), id, StockInput { stock: Some(-3) })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Validation(_)));

        let err = use_case
            .execute(h.manager(), ProductId::from_raw(77), StockInput { stock: Some(1) })
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::ProductNotFound));

        assert_eq!(
            h.audit.details().last().unwrap(),
            &format!("Product {id} stock set to 0, performed by Mona Manager")
        );
    }

    #[tokio::test]
    async fn test_deleting_category_drops_links() {
        let h = Harness::new();
        let shoes = h.category("Shoes").await;
        let id = h.create_product(boots(vec![shoes.value()])).await.unwrap();

        DeleteCategoryUseCase::new(h.store.clone(), h.recorder())
            .execute(h.manager(), shoes)
            .await
            .unwrap();

        assert!(h.store.product(id.value()).unwrap().category_ids.is_empty());
    }

    #[tokio::test]
    async fn test_delete_product() {
        let h = Harness::new();
        let id = h.create_product(boots(vec![])).await.unwrap();
        let use_case = DeleteProductUseCase::new(h.store.clone(), h.recorder());

        use_case.execute(h.manager(), id).await.unwrap();
        let err = use_case.execute(h.manager(), id).await.unwrap_err();
        assert!(matches!(err, CatalogError::ProductNotFound));
    }

    #[tokio::test]
    async fn test_audit_failure_surfaces_after_write() {
        let h = Harness::new();
        h.audit.fail_writes.store(true, Ordering::SeqCst);

        let err = h.create_product(boots(vec![])).await.unwrap_err();

        assert!(matches!(err, CatalogError::Audit(_)));
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(err.to_app_error().message(), "Database error");
        // The product row itself is committed
        assert!(h.store.product(1).is_some());
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use platform::jwt::{JwtConfig, SessionClaims, TokenService};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::fakes::*;
    use crate::presentation::router::catalog_router_generic;

    fn app() -> (axum::Router, Arc<TokenService>) {
        let tokens = Arc::new(TokenService::new(JwtConfig::new("catalog-test-secret")));
        let router = catalog_router_generic(
            MemoryCatalog::default(),
            MemoryAudit::default(),
            tokens.clone(),
        );
        (router, tokens)
    }

    fn bearer(tokens: &TokenService, role: &str) -> String {
        let claims = SessionClaims::new(MANAGER_ID, "mona@example.com", role);
        format!("Bearer {}", tokens.issue(&claims, false).unwrap().access_token)
    }

    fn request(method: &str, uri: &str, auth: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, auth);
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_employee_is_forbidden() {
        let (router, tokens) = app();
        let auth = bearer(&tokens, "EMPLOYEE");

        let response = router
            .oneshot(request("GET", "/category", &auth, None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let (router, _) = app();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/product")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_manager_creates_category_and_product() {
        let (router, tokens) = app();
        let auth = bearer(&tokens, "MANAGER");

        let response = router
            .clone()
            .oneshot(request(
                "POST",
                "/category/create",
                &auth,
                Some(json!({"name": "Shoes"})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Category created");
        let category_id = body["data"]["id"].as_i64().unwrap();

        let response = router
            .clone()
            .oneshot(request(
                "POST",
                "/product/create",
                &auth,
                Some(json!({
                    "name": "Boots",
                    "description": "Leather boots",
                    "price": 120.5,
                    "stock": 4,
                    "categoryId": [category_id]
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let product_id = body_json(response).await["data"]["id"].as_i64().unwrap();

        let response = router
            .oneshot(request(
                "GET",
                &format!("/product/{product_id}"),
                &auth,
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["categoryIds"], json!([category_id]));
        assert_eq!(body["data"]["createdBy"], MANAGER_ID);
    }

    #[tokio::test]
    async fn test_unknown_category_link_is_404() {
        let (router, tokens) = app();
        let auth = bearer(&tokens, "ADMIN");

        let response = router
            .oneshot(request(
                "POST",
                "/product/create",
                &auth,
                Some(json!({
                    "name": "Boots",
                    "description": "Leather boots",
                    "price": 10.0,
                    "stock": 1,
                    "categoryId": [7]
                })),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Categories not found: 7");
    }

    #[tokio::test]
    async fn test_stock_validation_envelope() {
        let (router, tokens) = app();
        let auth = bearer(&tokens, "MANAGER");

        let response = router
            .oneshot(request(
                "PUT",
                "/product-stock/1",
                &auth,
                Some(json!({"stock": -5})),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Validation error");
        assert!(body["data"]["stock"].is_array());
    }
}
