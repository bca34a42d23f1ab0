//! Catalog Router
//!
//! Every route is restricted to administrators and managers.

use axum::{
    Router,
    routing::{delete, get, post, put},
};
use std::sync::Arc;

use audit::{AuditRepository, PgAuditRepository};
use kernel::role::MANAGERS;
use platform::gate::gated;
use platform::jwt::TokenService;

use crate::domain::repository::{CategoryRepository, ProductRepository};
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the Catalog router with PostgreSQL repositories
pub fn catalog_router(
    repo: PgCatalogRepository,
    audit: PgAuditRepository,
    tokens: Arc<TokenService>,
) -> Router {
    catalog_router_generic(repo, audit, tokens)
}

/// Create a generic Catalog router for any repository implementation
pub fn catalog_router_generic<R, A>(repo: R, audit: A, tokens: Arc<TokenService>) -> Router
where
    R: CategoryRepository + ProductRepository + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        audit: Arc::new(audit),
    };

    let routes = Router::new()
        .route("/category/create", post(handlers::create_category::<R, A>))
        .route("/category", get(handlers::list_categories::<R, A>))
        .route("/category/{category_id}", get(handlers::get_category::<R, A>))
        .route(
            "/category/update/{category_id}",
            put(handlers::update_category::<R, A>),
        )
        .route(
            "/category/delete/{category_id}",
            delete(handlers::delete_category::<R, A>),
        )
        .route("/product/create", post(handlers::create_product::<R, A>))
        .route("/product", get(handlers::list_products::<R, A>))
        .route("/product/{product_id}", get(handlers::get_product::<R, A>))
        .route(
            "/product/update/{product_id}",
            put(handlers::update_product::<R, A>),
        )
        .route(
            "/product/delete/{product_id}",
            delete(handlers::delete_product::<R, A>),
        )
        .route(
            "/product-stock/{product_id}",
            put(handlers::update_stock::<R, A>),
        );

    gated(routes, &tokens, MANAGERS).with_state(state)
}
