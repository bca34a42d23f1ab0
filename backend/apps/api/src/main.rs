//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request-level errors are the
//! per-crate enums rendered through `kernel::error::AppError`.

mod config;

use std::sync::Arc;

use audit::{PgAuditRepository, audit_router};
use auth::{AuthConfig, BootstrapAdminUseCase, PgAuthRepository, RedisCodeStore, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
};
use catalog::{PgCatalogRepository, catalog_router};
use platform::jwt::TokenService;
use platform::mail::BrevoMailer;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, BootstrapAdmin};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,catalog=info,audit=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let codes = RedisCodeStore::connect(&config.redis_url).await?;

    tracing::info!("Connected to Redis");

    if let Some(admin) = config.bootstrap_admin.clone() {
        bootstrap_admin(&pool, &config.auth, admin).await?;
    }

    let tokens = Arc::new(TokenService::new(config.jwt.clone()));
    let mailer = BrevoMailer::new(config.mail.clone())?;
    let audit_repo = PgAuditRepository::new(pool.clone());

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Build router
    let api = Router::new()
        .merge(auth_router(
            PgAuthRepository::new(pool.clone()),
            codes,
            audit_repo.clone(),
            mailer,
            tokens.clone(),
            config.auth.clone(),
        ))
        .merge(catalog_router(
            PgCatalogRepository::new(pool.clone()),
            audit_repo.clone(),
            tokens.clone(),
        ))
        .merge(audit_router(audit_repo, tokens));

    let app = Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the configured administrator unless the email already exists
async fn bootstrap_admin(
    pool: &PgPool,
    auth_config: &AuthConfig,
    admin: BootstrapAdmin,
) -> anyhow::Result<()> {
    let repo = Arc::new(PgAuthRepository::new(pool.clone()));
    let use_case = BootstrapAdminUseCase::new(repo.clone(), repo, Arc::new(auth_config.clone()));

    let email = admin.email.clone();
    match use_case.execute(admin.into()).await {
        Ok(true) => tracing::info!(email = %email, "Bootstrap administrator created"),
        Ok(false) => {}
        Err(e) => anyhow::bail!("bootstrap administrator failed: {e}"),
    }

    Ok(())
}
