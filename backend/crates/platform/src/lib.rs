//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Password hashing (Argon2id, NIST SP 800-63B compliant)
//! - Session token issuance and validation (JWT, HMAC)
//! - Role gate middleware for protected route groups
//! - Transactional mail delivery

pub mod gate;
pub mod jwt;
pub mod mail;
pub mod password;
