//! Session Tokens (JWT)
//!
//! Issues and validates HMAC-signed session tokens. An access token and a
//! refresh token are issued together from the same claim; they differ only
//! in expiry. Validation checks signature and expiry and returns the
//! embedded claim unchanged.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::error::app_error::AppError;
use rand::{RngCore, rngs::OsRng};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// ============================================================================
// Configuration
// ============================================================================

/// Token signing configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// HMAC secret
    pub secret: Vec<u8>,
    /// HS256, HS384 or HS512
    pub algorithm: Algorithm,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
    /// Refresh token lifetime when the caller asked to be remembered
    pub refresh_ttl_remember: Duration,
}

impl JwtConfig {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
            algorithm: Algorithm::HS256,
            access_ttl: Duration::from_secs(3600),
            refresh_ttl: Duration::from_secs(24 * 3600),
            refresh_ttl_remember: Duration::from_secs(30 * 24 * 3600),
        }
    }

    /// Random 32-byte secret for local runs; tokens do not survive a restart
    pub fn ephemeral() -> Self {
        let mut secret = vec![0u8; 32];
        OsRng.fill_bytes(&mut secret);
        Self::new(secret)
    }

    /// Parse an algorithm name, accepting only the HMAC family
    pub fn parse_algorithm(name: &str) -> Result<Algorithm, TokenError> {
        match Algorithm::from_str(name) {
            Ok(alg @ (Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)) => Ok(alg),
            _ => Err(TokenError::UnsupportedAlgorithm(name.to_string())),
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &self.algorithm)
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("refresh_ttl_remember", &self.refresh_ttl_remember)
            .finish()
    }
}

// ============================================================================
// Claims
// ============================================================================

/// Identity facts carried by a session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub id: i64,
    pub email: String,
    pub role: String,
    /// Unique token id
    #[serde(rename = "jwtid")]
    pub jti: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<Value>,
}

impl SessionClaims {
    pub fn new(id: i64, email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            role: role.into(),
            jti: uuid::Uuid::new_v4().to_string(),
            custom_data: None,
        }
    }

    pub fn with_custom_data(mut self, data: Value) -> Self {
        self.custom_data = Some(data);
        self
    }
}

/// On-the-wire payload: the claim plus registered time claims
#[derive(Serialize, Deserialize)]
struct WireClaims {
    #[serde(flatten)]
    claims: SessionClaims,
    iat: i64,
    exp: i64,
}

/// Access Token + Refresh Token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
    pub token_type: &'static str,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Token has expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl TokenError {
    /// Expired and invalid tokens are both authentication failures
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, TokenError::Expired | TokenError::Invalid)
    }

    pub fn to_app_error(&self) -> AppError {
        if self.is_unauthenticated() {
            AppError::unauthorized(self.to_string())
        } else {
            AppError::internal(self.to_string())
        }
    }
}

// ============================================================================
// Token Service
// ============================================================================

/// Stateless token issuer/validator holding the signing keys
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    header: Header,
    validation: Validation,
    config: JwtConfig,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        let mut validation = Validation::new(config.algorithm);
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding: EncodingKey::from_secret(&config.secret),
            decoding: DecodingKey::from_secret(&config.secret),
            header: Header::new(config.algorithm),
            validation,
            config,
        }
    }

    /// Issue an access/refresh pair for the same claim
    pub fn issue(&self, claims: &SessionClaims, remember_me: bool) -> Result<TokenPair, TokenError> {
        let now = Utc::now().timestamp();
        let access_ttl = ttl_secs(self.config.access_ttl);
        let refresh_ttl = if remember_me {
            ttl_secs(self.config.refresh_ttl_remember)
        } else {
            ttl_secs(self.config.refresh_ttl)
        };

        Ok(TokenPair {
            access_token: self.encode(claims, now, now + access_ttl)?,
            refresh_token: self.encode(claims, now, now + refresh_ttl)?,
            expires_in: access_ttl,
            token_type: "Bearer",
        })
    }

    /// Verify signature and expiry and return the embedded claim
    pub fn validate(&self, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<WireClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }

    fn encode(&self, claims: &SessionClaims, iat: i64, exp: i64) -> Result<String, TokenError> {
        let wire = WireClaims {
            claims: claims.clone(),
            iat,
            exp,
        };
        encode(&self.header, &wire, &self.encoding).map_err(TokenError::Signing)
    }
}

fn ttl_secs(ttl: Duration) -> i64 {
    i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX)
}
