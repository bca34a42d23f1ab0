//! HTTP Handlers

use axum::extract::{Path, State};
use axum::{Extension, Json};
use std::sync::Arc;

use audit::{AuditRecorder, AuditRepository};
use kernel::id::{CategoryId, ProductId};
use kernel::response::ApiResponse;
use platform::gate::Actor;

use crate::application::{
    CreateCategoryUseCase, CreateProductUseCase, DeleteCategoryUseCase, DeleteProductUseCase,
    GetCategoryUseCase, GetProductUseCase, ListCategoriesUseCase, ListProductsUseCase,
    UpdateCategoryUseCase, UpdateProductUseCase, UpdateStockUseCase,
};
use crate::domain::repository::{CategoryRepository, ProductRepository};
use crate::error::CatalogResult;
use crate::presentation::dto::{
    CategoryRequest, CategoryResponse, ProductRequest, ProductResponse, StockRequest,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R, A>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub audit: Arc<A>,
}

impl<R, A> CatalogAppState<R, A>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    fn recorder(&self) -> AuditRecorder<A> {
        AuditRecorder::new(self.audit.clone())
    }
}

// ============================================================================
// Categories
// ============================================================================

/// POST /api/category/create
pub async fn create_category<R, A>(
    State(state): State<CatalogAppState<R, A>>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CategoryRequest>,
) -> CatalogResult<ApiResponse<CategoryResponse>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let use_case = CreateCategoryUseCase::new(state.repo.clone(), state.recorder());
    let category = use_case.execute(actor.user_id, req.into()).await?;

    Ok(ApiResponse::new(201, "Category created", Some(category.into())))
}

/// GET /api/category
pub async fn list_categories<R, A>(
    State(state): State<CatalogAppState<R, A>>,
) -> CatalogResult<ApiResponse<Vec<CategoryResponse>>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let categories = ListCategoriesUseCase::new(state.repo.clone()).execute().await?;

    Ok(ApiResponse::new(
        200,
        "Categories",
        Some(categories.into_iter().map(CategoryResponse::from).collect()),
    ))
}

/// GET /api/category/{category_id}
pub async fn get_category<R, A>(
    State(state): State<CatalogAppState<R, A>>,
    Path(category_id): Path<i64>,
) -> CatalogResult<ApiResponse<CategoryResponse>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let category = GetCategoryUseCase::new(state.repo.clone())
        .execute(CategoryId::from_raw(category_id))
        .await?;

    Ok(ApiResponse::new(200, "Category found", Some(category.into())))
}

/// PUT /api/category/update/{category_id}
pub async fn update_category<R, A>(
    State(state): State<CatalogAppState<R, A>>,
    Extension(actor): Extension<Actor>,
    Path(category_id): Path<i64>,
    Json(req): Json<CategoryRequest>,
) -> CatalogResult<ApiResponse<()>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateCategoryUseCase::new(state.repo.clone(), state.recorder());
    use_case
        .execute(actor.user_id, CategoryId::from_raw(category_id), req.into())
        .await?;

    Ok(ApiResponse::done("Category updated"))
}

/// DELETE /api/category/delete/{category_id}
pub async fn delete_category<R, A>(
    State(state): State<CatalogAppState<R, A>>,
    Extension(actor): Extension<Actor>,
    Path(category_id): Path<i64>,
) -> CatalogResult<ApiResponse<()>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteCategoryUseCase::new(state.repo.clone(), state.recorder());
    use_case
        .execute(actor.user_id, CategoryId::from_raw(category_id))
        .await?;

    Ok(ApiResponse::done("Category deleted"))
}

// ============================================================================
// Products
// ============================================================================

/// POST /api/product/create
pub async fn create_product<R, A>(
    State(state): State<CatalogAppState<R, A>>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<ProductRequest>,
) -> CatalogResult<ApiResponse<ProductResponse>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        CreateProductUseCase::new(state.repo.clone(), state.repo.clone(), state.recorder());
    let product = use_case.execute(actor.user_id, req.into()).await?;

    Ok(ApiResponse::new(201, "Product created", Some(product.into())))
}

/// GET /api/product
pub async fn list_products<R, A>(
    State(state): State<CatalogAppState<R, A>>,
) -> CatalogResult<ApiResponse<Vec<ProductResponse>>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let products = ListProductsUseCase::new(state.repo.clone()).execute().await?;

    Ok(ApiResponse::new(
        200,
        "Products",
        Some(products.into_iter().map(ProductResponse::from).collect()),
    ))
}

/// GET /api/product/{product_id}
pub async fn get_product<R, A>(
    State(state): State<CatalogAppState<R, A>>,
    Path(product_id): Path<i64>,
) -> CatalogResult<ApiResponse<ProductResponse>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let product = GetProductUseCase::new(state.repo.clone())
        .execute(ProductId::from_raw(product_id))
        .await?;

    Ok(ApiResponse::new(200, "Product found", Some(product.into())))
}

/// PUT /api/product/update/{product_id}
pub async fn update_product<R, A>(
    State(state): State<CatalogAppState<R, A>>,
    Extension(actor): Extension<Actor>,
    Path(product_id): Path<i64>,
    Json(req): Json<ProductRequest>,
) -> CatalogResult<ApiResponse<()>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let use_case =
        UpdateProductUseCase::new(state.repo.clone(), state.repo.clone(), state.recorder());
    use_case
        .execute(actor.user_id, ProductId::from_raw(product_id), req.into())
        .await?;

    Ok(ApiResponse::done("Product updated"))
}

/// DELETE /api/product/delete/{product_id}
pub async fn delete_product<R, A>(
    State(state): State<CatalogAppState<R, A>>,
    Extension(actor): Extension<Actor>,
    Path(product_id): Path<i64>,
) -> CatalogResult<ApiResponse<()>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let use_case = DeleteProductUseCase::new(state.repo.clone(), state.recorder());
    use_case
        .execute(actor.user_id, ProductId::from_raw(product_id))
        .await?;

    Ok(ApiResponse::done("Product deleted"))
}

/// PUT /api/product-stock/{product_id}
pub async fn update_stock<R, A>(
    State(state): State<CatalogAppState<R, A>>,
    Extension(actor): Extension<Actor>,
    Path(product_id): Path<i64>,
    Json(req): Json<StockRequest>,
) -> CatalogResult<ApiResponse<()>>
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let use_case = UpdateStockUseCase::new(state.repo.clone(), state.recorder());
    use_case
        .execute(actor.user_id, ProductId::from_raw(product_id), req.into())
        .await?;

    Ok(ApiResponse::done("Product stock updated"))
}
