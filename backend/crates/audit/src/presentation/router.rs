//! Audit Router

use axum::{Router, routing::get};
use kernel::role::ADMINS;
use platform::gate::gated;
use platform::jwt::TokenService;
use std::sync::Arc;

use crate::domain::repository::AuditRepository;
use crate::infra::postgres::PgAuditRepository;
use crate::presentation::handlers::{self, AuditAppState};

/// Create the audit router with PostgreSQL repository
pub fn audit_router(repo: PgAuditRepository, tokens: Arc<TokenService>) -> Router {
    audit_router_generic(repo, tokens)
}

/// Create a generic audit router for any repository implementation
pub fn audit_router_generic<R>(repo: R, tokens: Arc<TokenService>) -> Router
where
    R: AuditRepository + Clone + Send + Sync + 'static,
{
    let state = AuditAppState {
        repo: Arc::new(repo),
    };

    let router = Router::new().route("/admin/logs", get(handlers::list_logs::<R>));

    gated(router, &tokens, ADMINS).with_state(state)
}
