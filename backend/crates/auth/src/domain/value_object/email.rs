//! Email Value Object
//!
//! Stored trimmed and lowercased so lookups and the uniqueness check
//! agree on a single spelling.

use serde::{Deserialize, Serialize};
use validator::{ValidateEmail, ValidationErrors};

use crate::error::field_error;

const EMAIL_MAX_LENGTH: usize = 254;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    pub fn new(email: impl Into<String>) -> Result<Self, ValidationErrors> {
        let email = email.into().trim().to_lowercase();

        if email.is_empty() {
            return Err(field_error("email", "required", "Email is required"));
        }
        if email.len() > EMAIL_MAX_LENGTH || !email.validate_email() {
            return Err(field_error("email", "email", "Email is invalid"));
        }

        Ok(Self(email))
    }

    /// Create from database value (assumed already normalized)
    pub fn from_db(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
