//! Audit Sink interface: durable log of room creation and closure.
//!
//! The log is for audit only; it is never read back for recovery.

use async_trait::async_trait;
use serde::Serialize;

use super::{AuditError, RoomStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomCreatedRecord {
    pub code: String,
    pub title: String,
    pub host: String,
    pub created_at: i64,
    pub files: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomClosedRecord {
    pub code: String,
    pub status: RoomStatus,
    pub completed_at: i64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record_created(&self, record: &RoomCreatedRecord) -> Result<(), AuditError>;

    async fn record_closed(&self, record: &RoomClosedRecord) -> Result<(), AuditError>;
}
