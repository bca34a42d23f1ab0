//! HTTP Handlers

use axum::extract::State;
use kernel::response::ApiResponse;
use std::sync::Arc;

use crate::application::ListAuditLogsUseCase;
use crate::domain::repository::AuditRepository;
use crate::error::AuditResult;
use crate::presentation::dto::AuditLogResponse;

/// Shared state for audit handlers
#[derive(Clone)]
pub struct AuditAppState<R>
where
    R: AuditRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

/// GET /api/admin/logs
pub async fn list_logs<R>(
    State(state): State<AuditAppState<R>>,
) -> AuditResult<ApiResponse<Vec<AuditLogResponse>>>
where
    R: AuditRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListAuditLogsUseCase::new(state.repo.clone());
    let logs = use_case.execute().await?;

    Ok(ApiResponse::ok(
        logs.into_iter().map(AuditLogResponse::from).collect(),
    ))
}
