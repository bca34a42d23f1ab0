//! Error Kind
//!
//! Every failure the backend reports falls into one of these buckets; the
//! bucket alone decides the HTTP status and the envelope's `code`.

use serde::Serialize;

/// エラー種別
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Conflict.status_code(), 409);
/// assert_eq!(ErrorKind::BadGateway.to_string(), "Bad Gateway");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// 入力検証エラー、無効なパスワード設定コード
    BadRequest,
    /// 認証情報なし、無効なトークン、ログイン失敗
    Unauthorized,
    /// ロール不足、未有効化・利用不可のアカウント
    Forbidden,
    NotFound,
    /// 一意制約違反、設定済みパスワード、削除済みユーザー
    Conflict,
    InternalServerError,
    /// メール送信の失敗・タイムアウト
    BadGateway,
    /// DB プール枯渇、Redis 接続断
    ServiceUnavailable,
}

impl ErrorKind {
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::InternalServerError => 500,
            ErrorKind::BadGateway => 502,
            ErrorKind::ServiceUnavailable => 503,
        }
    }

    /// 理由フレーズ
    pub const fn reason(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "Bad Request",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "Not Found",
            ErrorKind::Conflict => "Conflict",
            ErrorKind::InternalServerError => "Internal Server Error",
            ErrorKind::BadGateway => "Bad Gateway",
            ErrorKind::ServiceUnavailable => "Service Unavailable",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_failures_split_between_401_and_403() {
        assert_eq!(ErrorKind::Unauthorized.status_code(), 401);
        assert_eq!(ErrorKind::Forbidden.status_code(), 403);
    }

    #[test]
    fn test_upstream_failures_are_5xx() {
        for kind in [
            ErrorKind::InternalServerError,
            ErrorKind::BadGateway,
            ErrorKind::ServiceUnavailable,
        ] {
            assert!(kind.status_code() >= 500);
        }
    }
}
