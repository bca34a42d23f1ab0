//! Category Entity

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// User who created the category
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
}
