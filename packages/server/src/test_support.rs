//! Helpers shared by unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quizroom_shared::time::FixedClock;

use crate::{
    domain::{AuditError, AuditSink, RoomClosedRecord, RoomCode, RoomCreatedRecord, Username},
    infrastructure::{
        audit::{AuditQueue, AuditWorker},
        repository::InMemoryRoomRepository,
    },
};

/// 受け取った監査レコードを記録するシンク
#[derive(Default)]
pub struct RecordingAuditSink {
    pub created: Mutex<Vec<RoomCreatedRecord>>,
    pub closed: Mutex<Vec<RoomClosedRecord>>,
}

#[async_trait]
impl AuditSink for RecordingAuditSink {
    async fn record_created(&self, record: &RoomCreatedRecord) -> Result<(), AuditError> {
        self.created.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn record_closed(&self, record: &RoomClosedRecord) -> Result<(), AuditError> {
        self.closed.lock().unwrap().push(record.clone());
        Ok(())
    }
}

impl RecordingAuditSink {
    pub fn closed_codes(&self) -> Vec<String> {
        self.closed
            .lock()
            .unwrap()
            .iter()
            .map(|record| record.code.clone())
            .collect()
    }
}

pub fn code(value: &str) -> RoomCode {
    RoomCode::new(value.to_string()).unwrap()
}

pub fn user(value: &str) -> Username {
    Username::new(value.to_string()).unwrap()
}

/// 固定時刻（1000）と記録用シンクを使うルームテーブル
pub fn create_test_repository() -> (InMemoryRoomRepository, Arc<RecordingAuditSink>, AuditWorker) {
    let sink = Arc::new(RecordingAuditSink::default());
    let (queue, worker) = AuditQueue::start(sink.clone(), 64);
    let repo = InMemoryRoomRepository::new(Arc::new(FixedClock::new(1000)), queue);
    (repo, sink, worker)
}
