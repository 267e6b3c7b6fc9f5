//! Audit queue and worker.
//!
//! Records are published without blocking and written by a single background
//! worker, which keeps the created-before-closed order of each room. When the
//! queue is full the record is dropped with a warning. Sink failures are logged
//! and swallowed.

use std::sync::Arc;

use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
};

use crate::domain::{AuditSink, RoomClosedRecord, RoomCreatedRecord};

/// One record waiting to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditEntry {
    Created(RoomCreatedRecord),
    Closed(RoomClosedRecord),
}

/// Publishing side of the audit queue. Cheap to clone.
#[derive(Clone)]
pub struct AuditQueue {
    sender: mpsc::Sender<AuditEntry>,
}

/// Handle to the background worker.
pub struct AuditWorker {
    shutdown_tx: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl AuditQueue {
    /// Spawn the worker and return the queue together with its handle.
    ///
    /// Must be called inside a tokio runtime.
    pub fn start(sink: Arc<dyn AuditSink>, capacity: usize) -> (Self, AuditWorker) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let handle = tokio::spawn(run_worker(sink, receiver, shutdown_rx));

        (
            Self { sender },
            AuditWorker {
                shutdown_tx,
                handle,
            },
        )
    }

    /// Enqueue a record. Never blocks.
    pub fn publish(&self, entry: AuditEntry) {
        match self.sender.try_send(entry) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(entry)) => {
                tracing::warn!("Audit queue is full, dropping record: {:?}", entry);
            }
            Err(mpsc::error::TrySendError::Closed(entry)) => {
                tracing::warn!("Audit queue is closed, dropping record: {:?}", entry);
            }
        }
    }
}

impl AuditWorker {
    /// Stop accepting records, write everything still queued, and join the worker.
    pub async fn shutdown(self) {
        // The worker may already be gone if every queue handle was dropped.
        let _ = self.shutdown_tx.send(());
        if let Err(e) = self.handle.await {
            tracing::error!("Audit worker terminated abnormally: {}", e);
        }
    }
}

async fn run_worker(
    sink: Arc<dyn AuditSink>,
    mut receiver: mpsc::Receiver<AuditEntry>,
    mut shutdown_rx: oneshot::Receiver<()>,
) {
    tracing::debug!("Audit worker started");

    loop {
        tokio::select! {
            entry = receiver.recv() => match entry {
                Some(entry) => write_entry(sink.as_ref(), entry).await,
                None => break,
            },
            _ = &mut shutdown_rx => {
                receiver.close();
                while let Some(entry) = receiver.recv().await {
                    write_entry(sink.as_ref(), entry).await;
                }
                break;
            }
        }
    }

    tracing::debug!("Audit worker stopped");
}

async fn write_entry(sink: &dyn AuditSink, entry: AuditEntry) {
    let result = match &entry {
        AuditEntry::Created(record) => sink.record_created(record).await,
        AuditEntry::Closed(record) => sink.record_closed(record).await,
    };

    if let Err(e) = result {
        tracing::error!("Failed to write audit record {:?}: {}", entry, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AuditError, RoomStatus, audit::MockAuditSink};
    use mockall::Sequence;

    fn created(code: &str) -> RoomCreatedRecord {
        RoomCreatedRecord {
            code: code.to_string(),
            title: "Quiz".to_string(),
            host: "alice".to_string(),
            created_at: 1000,
            files: vec![],
        }
    }

    fn closed(code: &str) -> RoomClosedRecord {
        RoomClosedRecord {
            code: code.to_string(),
            status: RoomStatus::Completed,
            completed_at: 2000,
        }
    }

    #[tokio::test]
    async fn test_records_are_written_in_publish_order() {
        // テスト項目: 作成レコードが終了レコードより先に書き込まれる
        // given (前提条件):
        let mut sink = MockAuditSink::new();
        let mut seq = Sequence::new();
        sink.expect_record_created()
            .withf(|record| record.code == "R1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        sink.expect_record_closed()
            .withf(|record| record.code == "R1" && record.status == RoomStatus::Completed)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        let (queue, worker) = AuditQueue::start(Arc::new(sink), 8);

        // when (操作):
        queue.publish(AuditEntry::Created(created("R1")));
        queue.publish(AuditEntry::Closed(closed("R1")));
        worker.shutdown().await;

        // then (期待する結果): MockAuditSink の drop 時に呼び出し回数と順序が検証される
    }

    #[tokio::test]
    async fn test_sink_failure_is_swallowed() {
        // テスト項目: シンクの書き込み失敗は後続レコードの処理を妨げない
        // given (前提条件):
        let mut sink = MockAuditSink::new();
        sink.expect_record_created()
            .times(2)
            .returning(|_| Err(AuditError::Io(std::io::Error::other("disk full"))));
        let (queue, worker) = AuditQueue::start(Arc::new(sink), 8);

        // when (操作):
        queue.publish(AuditEntry::Created(created("R1")));
        queue.publish(AuditEntry::Created(created("R2")));
        worker.shutdown().await;

        // then (期待する結果): 2件とも書き込みが試行される（パニックしない）
    }

    #[tokio::test]
    async fn test_publish_after_shutdown_is_dropped() {
        // テスト項目: ワーカー停止後の publish は破棄され、パニックしない
        // given (前提条件):
        let mut sink = MockAuditSink::new();
        sink.expect_record_created().times(0);
        let (queue, worker) = AuditQueue::start(Arc::new(sink), 8);
        worker.shutdown().await;

        // when (操作):
        queue.publish(AuditEntry::Created(created("R1")));

        // then (期待する結果): シンクは呼ばれない
    }
}
