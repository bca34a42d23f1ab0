//! Application Layer

pub mod list_logs;
pub mod record;

pub use list_logs::ListAuditLogsUseCase;
pub use record::AuditRecorder;
