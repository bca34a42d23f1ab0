//! Redis Verification Code Store
//!
//! Codes are stored as `password_code:<code>` → user id with a TTL, so an
//! expired code simply stops resolving.

use std::time::Duration;

use kernel::id::UserId;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;

use crate::domain::repository::VerificationCodeStore;
use crate::domain::value_object::VerificationCode;
use crate::error::AuthResult;

const KEY_PREFIX: &str = "password_code:";

#[derive(Clone)]
pub struct RedisCodeStore {
    conn: ConnectionManager,
}

impl RedisCodeStore {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    /// Open a managed connection that reconnects on failure
    pub async fn connect(url: &str) -> Result<Self, redis::RedisError> {
        tracing::info!("Connecting to Redis...");
        let client = redis::Client::open(url)?;
        let conn = ConnectionManager::new(client).await?;
        tracing::info!("Redis connection established");
        Ok(Self::new(conn))
    }

    fn key(code: &VerificationCode) -> String {
        format!("{KEY_PREFIX}{code}")
    }
}

impl VerificationCodeStore for RedisCodeStore {
    async fn issue(&self, user_id: UserId, ttl: Duration) -> AuthResult<VerificationCode> {
        let code = VerificationCode::generate();
        let mut conn = self.conn.clone();
        let _: () = conn
            .set_ex(Self::key(&code), user_id.value(), ttl.as_secs().max(1))
            .await?;

        tracing::debug!(user_id = %user_id, ttl_secs = ttl.as_secs(), "Verification code issued");

        Ok(code)
    }

    async fn resolve(&self, code: &VerificationCode) -> AuthResult<Option<UserId>> {
        let mut conn = self.conn.clone();
        let user_id: Option<i64> = conn.get(Self::key(code)).await?;

        Ok(user_id.map(UserId::from_raw))
    }

    async fn invalidate(&self, code: &VerificationCode) -> AuthResult<bool> {
        let mut conn = self.conn.clone();
        let removed: i64 = conn.del(Self::key(code)).await?;

        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_layout() {
        let code = VerificationCode::parse("3f2c").unwrap();
        assert_eq!(RedisCodeStore::key(&code), "password_code:3f2c");
    }
}
