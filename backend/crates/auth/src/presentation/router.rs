//! Auth Router
//!
//! Each route group sits behind its own role gate; the password-set and
//! login routes are public.

use axum::{
    Router,
    routing::{get, post, put},
};
use std::sync::Arc;

use audit::{AuditRepository, PgAuditRepository};
use kernel::role::{ADMINS, MANAGERS, STAFF};
use platform::gate::gated;
use platform::jwt::TokenService;
use platform::mail::{BrevoMailer, Mailer};

use crate::application::config::AuthConfig;
use crate::domain::repository::{RoleRepository, UserRepository, VerificationCodeStore};
use crate::infra::{PgAuthRepository, RedisCodeStore};
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL, Redis and Brevo collaborators
pub fn auth_router(
    repo: PgAuthRepository,
    codes: RedisCodeStore,
    audit: PgAuditRepository,
    mailer: BrevoMailer,
    tokens: Arc<TokenService>,
    config: AuthConfig,
) -> Router {
    auth_router_generic(repo, codes, audit, mailer, tokens, config)
}

/// Create a generic Auth router for any collaborator implementations
pub fn auth_router_generic<R, C, A, M>(
    repo: R,
    codes: C,
    audit: A,
    mailer: M,
    tokens: Arc<TokenService>,
    config: AuthConfig,
) -> Router
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        codes: Arc::new(codes),
        audit: Arc::new(audit),
        mailer: Arc::new(mailer),
        tokens: tokens.clone(),
        config: Arc::new(config),
    };

    let admins = Router::new()
        .route("/admin/users/roles", post(handlers::create_role::<R, C, A, M>))
        .route(
            "/admin/users/deactivate/{user_id}",
            put(handlers::deactivate_user::<R, C, A, M>),
        );

    let managers =
        Router::new().route("/admin/users", get(handlers::list_users::<R, C, A, M>));

    let staff = Router::new()
        .route("/admin/users/create", post(handlers::create_user::<R, C, A, M>))
        .route(
            "/admin/users/update-info/{user_id}",
            put(handlers::update_user::<R, C, A, M>),
        )
        .route(
            "/admin/users/delete/{user_id}",
            put(handlers::delete_user::<R, C, A, M>),
        )
        .route("/users/change-info", put(handlers::change_info::<R, C, A, M>));

    Router::new()
        .route("/users/password", post(handlers::set_password::<R, C, A, M>))
        .route("/users/login", post(handlers::sign_in::<R, C, A, M>))
        .merge(gated(admins, &tokens, ADMINS))
        .merge(gated(managers, &tokens, MANAGERS))
        .merge(gated(staff, &tokens, STAFF))
        .with_state(state)
}
