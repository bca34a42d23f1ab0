//! Repository Traits

use kernel::id::{AuditEntryId, UserId};

use crate::domain::entity::{AuditLog, NewAuditEntry};
use crate::error::AuditResult;

/// Audit log repository trait
#[trait_variant::make(AuditRepository: Send)]
pub trait LocalAuditRepository {
    /// Resolve the display name of the acting user
    async fn find_actor_name(&self, user_id: UserId) -> AuditResult<Option<String>>;

    /// Append an entry
    async fn append(&self, entry: &NewAuditEntry) -> AuditResult<AuditEntryId>;

    /// All entries, newest first
    async fn list(&self) -> AuditResult<Vec<AuditLog>>;
}
