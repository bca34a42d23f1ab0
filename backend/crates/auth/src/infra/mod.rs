//! Infrastructure Layer
//!
//! Database and cache implementations of the domain repositories.

pub mod postgres;
pub mod redis;

pub use postgres::PgAuthRepository;
pub use self::redis::RedisCodeStore;
