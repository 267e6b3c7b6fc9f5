//! Append-only JSON-lines audit file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use tokio::{
    fs::{File, OpenOptions},
    io::AsyncWriteExt,
    sync::Mutex,
};

use crate::domain::{AuditError, AuditSink, RoomClosedRecord, RoomCreatedRecord};

/// One line of the audit file.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum AuditLine<'a> {
    RoomCreated(&'a RoomCreatedRecord),
    RoomClosed(&'a RoomClosedRecord),
}

/// Writes each record as one JSON object per line, flushing after every write.
pub struct JsonLinesAuditSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl JsonLinesAuditSink {
    /// Open (or create) the audit file in append mode.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, AuditError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;

        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn append(&self, line: AuditLine<'_>) -> Result<(), AuditError> {
        let mut bytes = serde_json::to_vec(&line)?;
        bytes.push(b'\n');

        let mut file = self.file.lock().await;
        file.write_all(&bytes).await?;
        file.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl AuditSink for JsonLinesAuditSink {
    async fn record_created(&self, record: &RoomCreatedRecord) -> Result<(), AuditError> {
        self.append(AuditLine::RoomCreated(record)).await
    }

    async fn record_closed(&self, record: &RoomClosedRecord) -> Result<(), AuditError> {
        self.append(AuditLine::RoomClosed(record)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomStatus;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_records_are_appended_as_json_lines() {
        // テスト項目: 作成・終了レコードが1行1オブジェクトで追記される
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let sink = JsonLinesAuditSink::open(&path).await.unwrap();

        // when (操作):
        sink.record_created(&RoomCreatedRecord {
            code: "R1".to_string(),
            title: "Rust".to_string(),
            host: "alice".to_string(),
            created_at: 1000,
            files: vec!["slides.pdf".to_string()],
        })
        .await
        .unwrap();
        sink.record_closed(&RoomClosedRecord {
            code: "R1".to_string(),
            status: RoomStatus::Completed,
            completed_at: 2000,
        })
        .await
        .unwrap();

        // then (期待する結果):
        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(
            lines[0],
            json!({
                "kind": "room_created",
                "code": "R1",
                "title": "Rust",
                "host": "alice",
                "createdAt": 1000,
                "files": ["slides.pdf"]
            })
        );
        assert_eq!(
            lines[1],
            json!({
                "kind": "room_closed",
                "code": "R1",
                "status": "completed",
                "completedAt": 2000
            })
        );
    }

    #[tokio::test]
    async fn test_reopen_appends_to_existing_file() {
        // テスト項目: 既存ファイルを開き直しても内容は上書きされない
        // given (前提条件):
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("audit.jsonl");
        let record = RoomClosedRecord {
            code: "R1".to_string(),
            status: RoomStatus::Completed,
            completed_at: 2000,
        };
        JsonLinesAuditSink::open(&path)
            .await
            .unwrap()
            .record_closed(&record)
            .await
            .unwrap();

        // when (操作):
        let sink = JsonLinesAuditSink::open(&path).await.unwrap();
        sink.record_closed(&record).await.unwrap();

        // then (期待する結果):
        let content = tokio::fs::read_to_string(sink.path()).await.unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
