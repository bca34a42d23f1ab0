//! Server Configuration
//!
//! Built once at startup from environment variables (after `.env` is
//! loaded) and split into the typed configs each component takes.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::{AuthConfig, BootstrapAdminInput};
use platform::jwt::JwtConfig;
use platform::mail::MailConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub redis_url: String,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub jwt: JwtConfig,
    pub auth: AuthConfig,
    pub mail: MailConfig,
    /// First administrator, created at startup when all three
    /// `BOOTSTRAP_ADMIN_*` variables are set
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub first_name: String,
    pub password: String,
}

impl std::fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl From<BootstrapAdmin> for BootstrapAdminInput {
    fn from(admin: BootstrapAdmin) -> Self {
        Self {
            email: admin.email,
            first_name: admin.first_name,
            password: admin.password,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;
        let redis_url = get("REDIS_URL").context("REDIS_URL must be set")?;

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse::<SocketAddr>()
            .context("BIND_ADDR must be host:port")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let jwt = jwt_config(&get)?;

        let auth = AuthConfig {
            code_ttl: Duration::from_secs(parse_or(&get, "PASSWORD_CODE_TTL_SECS", 3 * 3600)?),
            backend_url: get("BACKEND_URL").unwrap_or_else(|| format!("http://{bind_addr}")),
            password_setup_template_id: parse_or(&get, "MAIL_PASSWORD_SETUP_TEMPLATE_ID", 1)?,
            notify_timeout: Duration::from_secs(parse_or(&get, "MAIL_TIMEOUT_SECS", 10)?),
            password_pepper: get("PASSWORD_PEPPER").map(String::into_bytes),
        };

        let mail = MailConfig {
            api_url: get("MAIL_API_URL").unwrap_or_else(|| "https://api.brevo.com".to_string()),
            api_key: get("MAIL_API_KEY").unwrap_or_default(),
            sender_email: get("MAIL_SENDER_EMAIL")
                .unwrap_or_else(|| "no-reply@localhost".to_string()),
            sender_name: get("MAIL_SENDER_NAME").unwrap_or_else(|| "Admin".to_string()),
            timeout: auth.notify_timeout,
        };

        let bootstrap_admin = match (
            get("BOOTSTRAP_ADMIN_EMAIL"),
            get("BOOTSTRAP_ADMIN_NAME"),
            get("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Some(email), Some(first_name), Some(password)) => Some(BootstrapAdmin {
                email,
                first_name,
                password,
            }),
            (None, None, None) => None,
            _ => bail!(
                "BOOTSTRAP_ADMIN_EMAIL, BOOTSTRAP_ADMIN_NAME and BOOTSTRAP_ADMIN_PASSWORD must be set together"
            ),
        };

        Ok(Self {
            database_url,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 5)?,
            redis_url,
            bind_addr,
            frontend_origins,
            jwt,
            auth,
            mail,
            bootstrap_admin,
        })
    }
}

fn jwt_config<G>(get: &G) -> anyhow::Result<JwtConfig>
where
    G: Fn(&str) -> Option<String>,
{
    let mut config = match get("JWT_SECRET") {
        Some(secret) => JwtConfig::new(secret.into_bytes()),
        None if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using a random per-process secret");
            JwtConfig::ephemeral()
        }
        None => bail!("JWT_SECRET must be set in release builds"),
    };

    if let Some(name) = get("JWT_ALGORITHM") {
        config.algorithm = JwtConfig::parse_algorithm(&name)?;
    }
    config.access_ttl = Duration::from_secs(parse_or(get, "JWT_ACCESS_TTL_SECS", 3600)?);
    config.refresh_ttl = Duration::from_secs(parse_or(get, "JWT_REFRESH_TTL_SECS", 86_400)?);
    config.refresh_ttl_remember = Duration::from_secs(parse_or(
        get,
        "JWT_REFRESH_TTL_REMEMBER_SECS",
        30 * 86_400,
    )?);

    Ok(config)
}

/// Parse a variable, falling back to `default` when unset.
/// A set but malformed value is an error.
fn parse_or<G, T>(get: &G, key: &str, default: T) -> anyhow::Result<T>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}
