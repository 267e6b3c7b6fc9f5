//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリのルームテーブルとして使用します。
//!
//! ## 排他制御
//!
//! メンバーシップを変更する操作（create / join / leave）は全て書き込みロックの
//! 内側で完結するため、同じルームへの並行した join / leave で更新が失われることは
//! ありません。`get` / `list_all` は読み込みロックでスナップショットを返します。
//!
//! 監査レコードはロックを解放した後に `AuditQueue` へ投入します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use quizroom_shared::time::Clock;
use tokio::sync::RwLock;

use crate::{
    domain::{
        LeaveOutcome, Room, RoomClosedRecord, RoomCode, RoomCreatedRecord, RoomError,
        RoomRepository, RoomStatus, RoomSummary, Timestamp, Username,
    },
    infrastructure::audit::{AuditEntry, AuditQueue},
};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    /// ルームコード → Room
    rooms: RwLock<HashMap<RoomCode, Room>>,
    /// 作成時刻・終了時刻の取得元
    clock: Arc<dyn Clock>,
    /// 監査レコードの投入先
    audit: AuditQueue,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(clock: Arc<dyn Clock>, audit: AuditQueue) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            clock,
            audit,
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create_room(
        &self,
        code: RoomCode,
        title: String,
        host: Username,
        files: Vec<String>,
    ) -> Result<Room, RoomError> {
        let room = {
            let mut rooms = self.rooms.write().await;
            if rooms.contains_key(&code) {
                return Err(RoomError::AlreadyExists(code.into_string()));
            }

            let room = Room::new(
                code.clone(),
                title,
                host,
                files,
                Timestamp::new(self.clock.now_millis()),
            );
            rooms.insert(code, room.clone());
            room
        };

        tracing::info!(
            "Room '{}' created by '{}'",
            room.code.as_str(),
            room.host.as_str()
        );
        self.audit.publish(AuditEntry::Created(RoomCreatedRecord {
            code: room.code.as_str().to_string(),
            title: room.title.clone(),
            host: room.host.as_str().to_string(),
            created_at: room.created_at.value(),
            files: room.attached_files.clone(),
        }));

        Ok(room)
    }

    async fn join_room(&self, code: &RoomCode, username: Username) -> Result<Room, RoomError> {
        let mut rooms = self.rooms.write().await;
        let room = rooms
            .get_mut(code)
            .ok_or_else(|| RoomError::NotFound(code.as_str().to_string()))?;

        if room.add_member(username.clone()) {
            tracing::debug!("'{}' joined room '{}'", username.as_str(), code.as_str());
        } else {
            tracing::debug!(
                "'{}' is already a member of room '{}'",
                username.as_str(),
                code.as_str()
            );
        }

        Ok(room.clone())
    }

    async fn leave_room(&self, code: &RoomCode, username: &Username) -> LeaveOutcome {
        let outcome = {
            let mut rooms = self.rooms.write().await;
            let Some(room) = rooms.get_mut(code) else {
                return LeaveOutcome::NotMember;
            };
            if !room.remove_member(username) {
                return LeaveOutcome::NotMember;
            }

            if room.is_empty() {
                rooms.remove(code);
                LeaveOutcome::Closed
            } else {
                LeaveOutcome::Left(room.clone())
            }
        };

        tracing::debug!("'{}' left room '{}'", username.as_str(), code.as_str());
        if outcome == LeaveOutcome::Closed {
            tracing::info!("Room '{}' closed: last member left", code.as_str());
            self.audit.publish(AuditEntry::Closed(RoomClosedRecord {
                code: code.as_str().to_string(),
                status: RoomStatus::Completed,
                completed_at: self.clock.now_millis(),
            }));
        }

        outcome
    }

    async fn get(&self, code: &RoomCode) -> Option<Room> {
        let rooms = self.rooms.read().await;
        rooms.get(code).cloned()
    }

    async fn list_all(&self) -> Vec<RoomSummary> {
        let rooms = self.rooms.read().await;
        let mut summaries: Vec<RoomSummary> = rooms.values().map(Room::summary).collect();

        // Sort by code for consistent ordering
        summaries.sort_by(|a, b| a.code.cmp(&b.code));

        summaries
    }
}
