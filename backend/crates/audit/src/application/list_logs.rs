//! List Audit Logs Use Case

use std::sync::Arc;

use crate::domain::entity::AuditLog;
use crate::domain::repository::AuditRepository;
use crate::error::AuditResult;

pub struct ListAuditLogsUseCase<R>
where
    R: AuditRepository,
{
    repo: Arc<R>,
}

impl<R> ListAuditLogsUseCase<R>
where
    R: AuditRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self) -> AuditResult<Vec<AuditLog>> {
        self.repo.list().await
    }
}
