//! Audit Recorder
//!
//! Appends one entry per administrative mutation. Callers invoke it after
//! their own write has committed; a failure here is returned to them and
//! does not undo that write.

use std::sync::Arc;

use kernel::id::{AuditEntryId, UserId};

use crate::domain::entity::{AuditAction, NewAuditEntry};
use crate::domain::repository::AuditRepository;
use crate::error::{AuditError, AuditResult};

pub struct AuditRecorder<R>
where
    R: AuditRepository,
{
    repo: Arc<R>,
}

impl<R> Clone for AuditRecorder<R>
where
    R: AuditRepository,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R> AuditRecorder<R>
where
    R: AuditRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn record(
        &self,
        actor: UserId,
        action: AuditAction,
        detail: &str,
    ) -> AuditResult<AuditEntryId> {
        let actor_name = self
            .repo
            .find_actor_name(actor)
            .await?
            .ok_or(AuditError::ActorNotFound(actor))?;

        let entry = NewAuditEntry::new(actor, action, detail, &actor_name);
        let id = self.repo.append(&entry).await?;

        tracing::info!(
            audit_id = %id,
            actor_id = %actor,
            action = %action,
            "Audit entry recorded"
        );

        Ok(id)
    }
}
