//! Error conversions
//!
//! Classifies database errors, flattens validation errors into the
//! envelope's `data`, and renders [`AppError`] as an axum response.

#[allow(unused_imports)]
use super::app_error::AppError;
#[allow(unused_imports)]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// PostgreSQL unique_violation
#[cfg(feature = "sqlx")]
const PG_UNIQUE_VIOLATION: &str = "23505";

/// 一意制約違反かどうか
///
/// 事前チェックをすり抜けた同時実行の重複挿入を検出するために使います。
#[cfg(feature = "sqlx")]
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err
            .code()
            .is_some_and(|code| code.as_ref() == PG_UNIQUE_VIOLATION),
        _ => false,
    }
}

/// sqlx エラーをエラー種別に分類
///
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
#[cfg(feature = "sqlx")]
pub fn sqlx_error_kind(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::ServiceUnavailable
        }
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // Class 23 — Integrity Constraint Violation
            Some("23000") | Some("23001") | Some("23503") | Some(PG_UNIQUE_VIOLATION) => {
                ErrorKind::Conflict
            }
            Some("23502") | Some("23514") => ErrorKind::BadRequest,
            // Class 53 — Insufficient Resources / Class 57 — Operator Intervention
            Some("53000") | Some("53100") | Some("53200") | Some("53300") | Some("57000")
            | Some("57014") | Some("57P01") | Some("57P02") | Some("57P03") => {
                ErrorKind::ServiceUnavailable
            }
            _ => ErrorKind::InternalServerError,
        },
        _ => ErrorKind::InternalServerError,
    }
}

// ============================================================================
// validator conversions (feature-gated)
// ============================================================================

/// 検証エラーを `{field: [code, ...]}` 形式の JSON に変換
///
/// メッセージが設定されていればそれを、なければ検証コードを使います。
#[cfg(feature = "validator")]
pub fn validation_details(errors: &validator::ValidationErrors) -> serde_json::Value {
    let fields = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let reasons = errs
                .iter()
                .map(|e| {
                    let reason = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    serde_json::Value::String(reason)
                })
                .collect();
            (field.to_string(), serde_json::Value::Array(reasons))
        })
        .collect::<serde_json::Map<_, _>>();

    serde_json::Value::Object(fields)
}

#[cfg(feature = "validator")]
impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::bad_request("Validation error").with_details(validation_details(&err))
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = serde_json::json!({
            "code": self.status_code(),
            "message": self.message(),
            "data": self.details(),
        });

        (status, Json(body)).into_response()
    }
}
