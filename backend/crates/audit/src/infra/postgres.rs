//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{AuditEntryId, UserId};
use sqlx::PgPool;

use crate::domain::entity::{AuditLog, NewAuditEntry, display_name};
use crate::domain::repository::AuditRepository;
use crate::error::AuditResult;

/// PostgreSQL-backed audit repository
#[derive(Clone)]
pub struct PgAuditRepository {
    pool: PgPool,
}

impl PgAuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl AuditRepository for PgAuditRepository {
    async fn find_actor_name(&self, user_id: UserId) -> AuditResult<Option<String>> {
        let row = sqlx::query_as::<_, (String, Option<String>)>(
            "SELECT first_name, last_name FROM users WHERE id = $1",
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|(first, last)| display_name(&first, last.as_deref())))
    }

    async fn append(&self, entry: &NewAuditEntry) -> AuditResult<AuditEntryId> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO audit_logs (user_id, action, details)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(entry.user_id.value())
        .bind(entry.action.label())
        .bind(&entry.details)
        .fetch_one(&self.pool)
        .await?;

        Ok(AuditEntryId::from_raw(id))
    }

    async fn list(&self) -> AuditResult<Vec<AuditLog>> {
        let rows = sqlx::query_as::<_, AuditLogRow>(
            r#"
            SELECT
                a.id,
                a.action,
                a.details,
                a.created_at,
                u.email AS actor_email,
                u.first_name AS actor_first_name
            FROM audit_logs a
            JOIN users u ON u.id = a.user_id
            ORDER BY a.created_at DESC, a.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(AuditLogRow::into_entity).collect())
    }
}

#[derive(sqlx::FromRow)]
struct AuditLogRow {
    id: i64,
    action: String,
    details: String,
    created_at: DateTime<Utc>,
    actor_email: String,
    actor_first_name: String,
}

impl AuditLogRow {
    fn into_entity(self) -> AuditLog {
        AuditLog {
            id: AuditEntryId::from_raw(self.id),
            action: self.action,
            details: self.details,
            created_at: self.created_at,
            actor_email: self.actor_email,
            actor_first_name: self.actor_first_name,
        }
    }
}
