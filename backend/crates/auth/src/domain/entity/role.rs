//! Role Entity
//!
//! Role names are stored uppercase; the role gate compares the name carried
//! in a token against fixed uppercase sets.

use chrono::{DateTime, Utc};
use kernel::id::RoleId;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
    /// Free-form permission document, stored as-is
    pub permissions: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    pub name: String,
    pub permissions: Value,
}

impl NewRole {
    pub fn new(name: &str, permissions: Value) -> Self {
        Self {
            name: normalize_role_name(name),
            permissions,
        }
    }
}

pub fn normalize_role_name(name: &str) -> String {
    name.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_role_name_uppercased() {
        let role = NewRole::new(" manager ", json!({"read": true}));
        assert_eq!(role.name, "MANAGER");
        assert_eq!(role.permissions, json!({"read": true}));
    }
}
