//! API DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entity::AuditLog;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogResponse {
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
    pub user: AuditActorResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditActorResponse {
    pub email: String,
    pub first_name: String,
}

impl From<AuditLog> for AuditLogResponse {
    fn from(log: AuditLog) -> Self {
        Self {
            action: log.action,
            details: log.details,
            created_at: log.created_at,
            user: AuditActorResponse {
                email: log.actor_email,
                first_name: log.actor_first_name,
            },
        }
    }
}
