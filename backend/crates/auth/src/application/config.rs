//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::password::CredentialHasher;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Lifetime of a password-set code (3 hours)
    pub code_ttl: Duration,
    /// Public base URL the password-set link points at
    pub backend_url: String,
    /// Mail provider template used for the password-set message
    pub password_setup_template_id: i64,
    /// Upper bound on a single notification send
    pub notify_timeout: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            code_ttl: Duration::from_secs(3 * 3600),
            backend_url: "http://localhost:8080/".to_string(),
            password_setup_template_id: 1,
            notify_timeout: Duration::from_secs(10),
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    pub fn hasher(&self) -> CredentialHasher {
        CredentialHasher::new(self.password_pepper.clone())
    }

    /// Link mailed to a new user, `{backend_url}/api/users/password?code={code}`
    pub fn password_setup_link(&self, code: &str) -> String {
        format!(
            "{}/api/users/password?code={}",
            self.backend_url.trim_end_matches('/'),
            code
        )
    }
}
