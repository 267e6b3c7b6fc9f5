//! Room Table interface.
//!
//! The Room Table owns every mutation of room membership. Implementations must
//! serialize mutations so that concurrent joins and leaves on one room never
//! lose an update.

use async_trait::async_trait;

use super::{Room, RoomCode, RoomError, RoomSummary, Username};

/// Result of a leave request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaveOutcome {
    /// Room absent or username not a member. Nothing changed.
    NotMember,
    /// Member removed; carries the post-leave room.
    Left(Room),
    /// Member removed and the room became empty, so it was removed.
    Closed,
}

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a new waiting room whose only member is `host`.
    async fn create_room(
        &self,
        code: RoomCode,
        title: String,
        host: Username,
        files: Vec<String>,
    ) -> Result<Room, RoomError>;

    /// Add `username` to the room. Joining twice is a no-op that still succeeds.
    async fn join_room(&self, code: &RoomCode, username: Username) -> Result<Room, RoomError>;

    /// Remove `username` from the room, closing it when it becomes empty.
    async fn leave_room(&self, code: &RoomCode, username: &Username) -> LeaveOutcome;

    async fn get(&self, code: &RoomCode) -> Option<Room>;

    async fn list_all(&self) -> Vec<RoomSummary>;
}
