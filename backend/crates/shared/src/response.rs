//! Response envelope
//!
//! Every successful response body has the shape `{code, message, data}`,
//! mirroring the error body rendered from [`AppError`](crate::error::app_error::AppError).

use std::borrow::Cow;

use serde::Serialize;

/// 成功レスポンスのエンベロープ
///
/// ## Examples
/// ```rust
/// use kernel::response::ApiResponse;
///
/// let res = ApiResponse::ok(vec![1, 2, 3]);
/// assert_eq!(res.code, 200);
///
/// let res = ApiResponse::created("Category created");
/// assert_eq!(res.code, 201);
/// assert!(res.data.is_none());
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub code: u16,
    pub message: Cow<'static, str>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(code: u16, message: impl Into<Cow<'static, str>>, data: Option<T>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    /// 200 with a payload
    pub fn ok(data: T) -> Self {
        Self::new(200, "Success", Some(data))
    }
}

impl ApiResponse<()> {
    /// 201 without a payload
    pub fn created(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(201, message, None)
    }

    /// 200 without a payload
    pub fn done(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new(200, message, None)
    }
}

#[cfg(feature = "axum")]
impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::done("User deactivated")).unwrap();
        assert_eq!(body["code"], 200);
        assert_eq!(body["message"], "User deactivated");
        assert!(body["data"].is_null());

        let body = serde_json::to_value(ApiResponse::ok(serde_json::json!({ "id": 1 }))).unwrap();
        assert_eq!(body["data"]["id"], 1);
    }
}
