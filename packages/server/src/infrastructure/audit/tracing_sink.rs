//! Audit sink that only writes to the log. Used when no audit file is configured.

use async_trait::async_trait;

use crate::domain::{AuditError, AuditSink, RoomClosedRecord, RoomCreatedRecord};

#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record_created(&self, record: &RoomCreatedRecord) -> Result<(), AuditError> {
        tracing::info!(
            target: "quizroom_server::audit",
            code = %record.code,
            title = %record.title,
            host = %record.host,
            created_at = record.created_at,
            files = record.files.len(),
            "room created"
        );
        Ok(())
    }

    async fn record_closed(&self, record: &RoomClosedRecord) -> Result<(), AuditError> {
        tracing::info!(
            target: "quizroom_server::audit",
            code = %record.code,
            status = ?record.status,
            completed_at = record.completed_at,
            "room closed"
        );
        Ok(())
    }
}
