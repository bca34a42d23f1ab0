//! Audit Entities

use chrono::{DateTime, Utc};
use kernel::id::{AuditEntryId, UserId};
use std::fmt;

/// Administrative actions that leave an audit entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    RoleCreated,
    UserCreated,
    UserUpdated,
    UserDeactivated,
    UserDeleted,
    CategoryCreated,
    CategoryUpdated,
    CategoryDeleted,
    ProductCreated,
    ProductUpdated,
    ProductDeleted,
    ProductStockUpdated,
}

impl AuditAction {
    /// Label stored in the `action` column
    pub const fn label(&self) -> &'static str {
        match self {
            Self::RoleCreated => "Role created",
            Self::UserCreated => "User created",
            Self::UserUpdated => "User updated",
            Self::UserDeactivated => "User deactivated",
            Self::UserDeleted => "User deleted",
            Self::CategoryCreated => "Category created",
            Self::CategoryUpdated => "Category updated",
            Self::CategoryDeleted => "Category deleted",
            Self::ProductCreated => "Product created",
            Self::ProductUpdated => "Product updated",
            Self::ProductDeleted => "Product deleted",
            Self::ProductStockUpdated => "Product stock updated",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Entry about to be appended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuditEntry {
    pub user_id: UserId,
    pub action: AuditAction,
    pub details: String,
}

impl NewAuditEntry {
    /// Build the entry, suffixing the detail with the actor's display name
    pub fn new(user_id: UserId, action: AuditAction, detail: &str, actor_name: &str) -> Self {
        Self {
            user_id,
            action,
            details: format!("{detail}, performed by {actor_name}"),
        }
    }
}

/// Stored entry joined with the actor's identity
#[derive(Debug, Clone)]
pub struct AuditLog {
    pub id: AuditEntryId,
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
    pub actor_email: String,
    pub actor_first_name: String,
}

/// "First Last", or just "First" when no last name is set
pub fn display_name(first_name: &str, last_name: Option<&str>) -> String {
    match last_name.map(str::trim).filter(|s| !s.is_empty()) {
        Some(last) => format!("{} {}", first_name.trim(), last),
        None => first_name.trim().to_string(),
    }
}
