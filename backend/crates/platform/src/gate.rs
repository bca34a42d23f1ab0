//! Role Gate
//!
//! Authorization decision point for protected route groups. Each group is
//! gated on an allowed set of role names; a request passes only when it
//! carries a valid session token whose role is in that set.
//!
//! Checks run in a fixed order:
//! 1. missing credential
//! 2. token validation
//! 3. role membership (exact, case-sensitive)

use std::sync::Arc;

use axum::Router;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::id::UserId;
use thiserror::Error;

use crate::jwt::{SessionClaims, TokenError, TokenService};

#[derive(Debug, Error)]
pub enum GateError {
    #[error("Authorization header is missing")]
    MissingCredential,

    #[error(transparent)]
    Unauthenticated(#[from] TokenError),

    #[error("Role {0} is not permitted to perform this action")]
    Forbidden(String),
}

impl GateError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GateError::MissingCredential | GateError::Unauthenticated(_) => ErrorKind::Unauthorized,
            GateError::Forbidden(_) => ErrorKind::Forbidden,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            GateError::MissingCredential => tracing::debug!("Request without credentials"),
            GateError::Unauthenticated(e) => tracing::warn!(error = %e, "Rejected session token"),
            GateError::Forbidden(role) => tracing::warn!(role = %role, "Role not permitted"),
        }
    }
}

impl IntoResponse for GateError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

/// Authenticated caller, inserted into request extensions by [`require_roles`]
#[derive(Debug, Clone)]
pub struct Actor {
    pub user_id: UserId,
    pub email: String,
    pub role: String,
}

impl From<SessionClaims> for Actor {
    fn from(claims: SessionClaims) -> Self {
        Self {
            user_id: UserId::from_raw(claims.id),
            email: claims.email,
            role: claims.role,
        }
    }
}

/// Gate for one allowed set of roles
#[derive(Clone)]
pub struct RoleGate {
    tokens: Arc<TokenService>,
    allowed: &'static [&'static str],
}

impl RoleGate {
    pub fn new(tokens: Arc<TokenService>, allowed: &'static [&'static str]) -> Self {
        Self { tokens, allowed }
    }

    /// Decide on a raw `Authorization` header value
    ///
    /// Accepts `Bearer <token>` or a bare token.
    pub fn authorize(&self, authorization: Option<&str>) -> Result<SessionClaims, GateError> {
        let raw = authorization.map(str::trim).unwrap_or_default();
        let token = strip_bearer(raw).trim();
        if token.is_empty() {
            return Err(GateError::MissingCredential);
        }

        let claims = self.tokens.validate(token)?;

        if !self.allowed.contains(&claims.role.as_str()) {
            return Err(GateError::Forbidden(claims.role));
        }

        Ok(claims)
    }
}

/// Drop a leading `Bearer` scheme, matched case-insensitively
///
/// A bare `Bearer` with nothing after it yields an empty token.
fn strip_bearer(raw: &str) -> &str {
    const SCHEME: &str = "bearer";
    match raw.get(..SCHEME.len()) {
        Some(head) if head.eq_ignore_ascii_case(SCHEME) => {
            let rest = &raw[SCHEME.len()..];
            if rest.is_empty() || rest.starts_with(char::is_whitespace) {
                rest
            } else {
                raw
            }
        }
        _ => raw,
    }
}

/// Middleware that requires a token whose role is in the gate's allowed set
pub async fn require_roles(
    State(gate): State<RoleGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, GateError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let claims = gate.authorize(header)?;
    tracing::debug!(user_id = claims.id, role = %claims.role, "Request authorized");

    req.extensions_mut().insert(Actor::from(claims));
    Ok(next.run(req).await)
}

/// Put every route currently in `router` behind a gate for `allowed`
pub fn gated<S>(
    router: Router<S>,
    tokens: &Arc<TokenService>,
    allowed: &'static [&'static str],
) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        RoleGate::new(tokens.clone(), allowed),
        require_roles,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtConfig;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::routing::get;
    use axum::Extension;
    use kernel::role::{ADMINS, MANAGERS, STAFF};
    use tower::ServiceExt;

    fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(JwtConfig::new("gate-test-secret")))
    }

    fn bearer(tokens: &TokenService, role: &str) -> String {
        let claims = SessionClaims::new(5, "alice@example.com", role);
        format!("Bearer {}", tokens.issue(&claims, false).unwrap().access_token)
    }

    #[test]
    fn test_missing_header_fails_before_role_check() {
        let gate = RoleGate::new(tokens(), ADMINS);
        assert!(matches!(gate.authorize(None), Err(GateError::MissingCredential)));
        assert!(matches!(gate.authorize(Some("   ")), Err(GateError::MissingCredential)));
        assert!(matches!(gate.authorize(Some("Bearer ")), Err(GateError::MissingCredential)));
    }

    #[test]
    fn test_scheme_without_token_is_missing_credential() {
        let gate = RoleGate::new(tokens(), ADMINS);
        for header in ["Bearer", "bearer", "BEARER   ", "Bearer \t "] {
            assert!(
                matches!(gate.authorize(Some(header)), Err(GateError::MissingCredential)),
                "{header:?}"
            );
        }
    }

    #[test]
    fn test_scheme_is_case_insensitive() {
        let tokens = tokens();
        let gate = RoleGate::new(tokens.clone(), ADMINS);
        let header = bearer(&tokens, "ADMIN");
        let lower = header.replacen("Bearer", "bearer", 1);
        let padded = header.replacen("Bearer ", "Bearer    ", 1);

        assert_eq!(gate.authorize(Some(&lower)).unwrap().role, "ADMIN");
        assert_eq!(gate.authorize(Some(&padded)).unwrap().id, 5);
    }

    #[test]
    fn test_employee_forbidden_on_admin_gate() {
        let tokens = tokens();
        let gate = RoleGate::new(tokens.clone(), ADMINS);
        let header = bearer(&tokens, "EMPLOYEE");

        let err = gate.authorize(Some(&header)).unwrap_err();
        assert!(matches!(err, GateError::Forbidden(ref role) if role == "EMPLOYEE"));
        assert_eq!(err.kind(), ErrorKind::Forbidden);
    }

    #[test]
    fn test_role_match_is_case_sensitive() {
        let tokens = tokens();
        let gate = RoleGate::new(tokens.clone(), MANAGERS);
        let header = bearer(&tokens, "manager");

        assert!(matches!(gate.authorize(Some(&header)), Err(GateError::Forbidden(_))));
    }

    #[test]
    fn test_allowed_role_passes_with_or_without_scheme() {
        let tokens = tokens();
        let gate = RoleGate::new(tokens.clone(), STAFF);
        let header = bearer(&tokens, "EMPLOYEE");
        let bare = header.trim_start_matches("Bearer ").to_string();

        assert_eq!(gate.authorize(Some(&header)).unwrap().id, 5);
        assert_eq!(gate.authorize(Some(&bare)).unwrap().role, "EMPLOYEE");
    }

    #[test]
    fn test_invalid_token_is_unauthenticated() {
        let gate = RoleGate::new(tokens(), STAFF);
        let err = gate.authorize(Some("Bearer garbage")).unwrap_err();
        assert!(matches!(err, GateError::Unauthenticated(_)));
        assert_eq!(err.to_app_error().status_code(), 401);
    }

    fn app(tokens: Arc<TokenService>, allowed: &'static [&'static str]) -> Router {
        let router = Router::new().route(
            "/protected",
            get(|Extension(actor): Extension<Actor>| async move { actor.email }),
        );
        gated(router, &tokens, allowed)
    }

    #[tokio::test]
    async fn test_middleware_inserts_actor() {
        let tokens = tokens();
        let header = bearer(&tokens, "MANAGER");
        let app = app(tokens, MANAGERS);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .header(AUTHORIZATION, header)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_middleware_rejects_without_header() {
        let app = app(tokens(), MANAGERS);

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/protected")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
