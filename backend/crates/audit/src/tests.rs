//! Unit tests for the audit crate

#[cfg(test)]
mod recorder_tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use chrono::Utc;
    use kernel::id::{AuditEntryId, UserId};

    use crate::application::{AuditRecorder, ListAuditLogsUseCase};
    use crate::domain::entity::{AuditAction, AuditLog, NewAuditEntry};
    use crate::domain::repository::AuditRepository;
    use crate::error::{AuditError, AuditResult};

    #[derive(Default)]
    struct MemoryAuditRepo {
        names: HashMap<i64, String>,
        entries: Mutex<Vec<NewAuditEntry>>,
        fail_writes: bool,
    }

    impl MemoryAuditRepo {
        fn with_actor(id: i64, name: &str) -> Self {
            Self {
                names: HashMap::from([(id, name.to_string())]),
                ..Default::default()
            }
        }
    }

    impl AuditRepository for MemoryAuditRepo {
        async fn find_actor_name(&self, user_id: UserId) -> AuditResult<Option<String>> {
            Ok(self.names.get(&user_id.value()).cloned())
        }

        async fn append(&self, entry: &NewAuditEntry) -> AuditResult<AuditEntryId> {
            if self.fail_writes {
                return Err(AuditError::Database(sqlx::Error::PoolTimedOut));
            }
            let mut entries = self.entries.lock().unwrap();
            entries.push(entry.clone());
            Ok(AuditEntryId::from_raw(entries.len() as i64))
        }

        async fn list(&self) -> AuditResult<Vec<AuditLog>> {
            let entries = self.entries.lock().unwrap();
            Ok(entries
                .iter()
                .enumerate()
                .rev()
                .map(|(i, e)| AuditLog {
                    id: AuditEntryId::from_raw(i as i64 + 1),
                    action: e.action.label().to_string(),
                    details: e.details.clone(),
                    created_at: Utc::now(),
                    actor_email: "admin@example.com".to_string(),
                    actor_first_name: "Ada".to_string(),
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_record_resolves_actor_name() {
        let repo = Arc::new(MemoryAuditRepo::with_actor(1, "Ada Lovelace"));
        let recorder = AuditRecorder::new(repo.clone());

        let id = recorder
            .record(UserId::from_raw(1), AuditAction::RoleCreated, "Role MANAGER created")
            .await
            .unwrap();

        assert_eq!(id, AuditEntryId::from_raw(1));
        let entries = repo.entries.lock().unwrap();
        assert_eq!(entries[0].action, AuditAction::RoleCreated);
        assert_eq!(
            entries[0].details,
            "Role MANAGER created, performed by Ada Lovelace"
        );
    }

    #[tokio::test]
    async fn test_record_fails_for_unknown_actor() {
        let repo = Arc::new(MemoryAuditRepo::default());
        let recorder = AuditRecorder::new(repo.clone());

        let err = recorder
            .record(UserId::from_raw(99), AuditAction::UserCreated, "User created")
            .await
            .unwrap_err();

        assert!(matches!(err, AuditError::ActorNotFound(id) if id.value() == 99));
        assert!(repo.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_record_surfaces_write_failure() {
        let repo = Arc::new(MemoryAuditRepo {
            fail_writes: true,
            ..MemoryAuditRepo::with_actor(1, "Ada")
        });
        let recorder = AuditRecorder::new(repo);

        let err = recorder
            .record(UserId::from_raw(1), AuditAction::ProductDeleted, "Product 4 deleted")
            .await
            .unwrap_err();

        assert_eq!(err.to_app_error().status_code(), 503);
    }

    #[test]
    fn test_database_failure_hides_storage_detail() {
        let err = AuditError::Database(sqlx::Error::Protocol(
            "relation \"audit_logs\" is locked".to_string(),
        ));

        let app_error = err.to_app_error();
        assert_eq!(app_error.status_code(), 500);
        assert_eq!(app_error.message(), "Database error");
        assert!(!app_error.to_string().contains("audit_logs"));

        let missing = AuditError::ActorNotFound(UserId::from_raw(9)).to_app_error();
        assert_eq!(missing.message(), "Audit actor 9 not found");
    }

    #[tokio::test]
    async fn test_list_returns_newest_first() {
        let repo = Arc::new(MemoryAuditRepo::with_actor(1, "Ada"));
        let recorder = AuditRecorder::new(repo.clone());
        let actor = UserId::from_raw(1);

        recorder
            .record(actor, AuditAction::CategoryCreated, "Category Shoes created")
            .await
            .unwrap();
        recorder
            .record(actor, AuditAction::CategoryDeleted, "Category Shoes deleted")
            .await
            .unwrap();

        let logs = ListAuditLogsUseCase::new(repo).execute().await.unwrap();
        assert_eq!(logs.len(), 2);
        assert_eq!(logs[0].action, "Category deleted");
        assert_eq!(logs[1].action, "Category created");
    }
}
