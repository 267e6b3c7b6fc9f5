//! Room entity.

use serde::Serialize;

use super::value_object::{RoomCode, Timestamp, Username};

/// Lifecycle status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Waiting,
    InProgress,
    Completed,
}

/// An ephemeral group of participants sharing broadcast events.
///
/// `host` is a static attribution: it stays the creator even after the
/// creator leaves. `members` keeps join order and never holds duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub code: RoomCode,
    pub host: Username,
    pub title: String,
    pub members: Vec<Username>,
    pub attached_files: Vec<String>,
    pub status: RoomStatus,
    pub created_at: Timestamp,
}

impl Room {
    /// Create a waiting room whose only member is the host.
    pub fn new(
        code: RoomCode,
        title: String,
        host: Username,
        attached_files: Vec<String>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            code,
            members: vec![host.clone()],
            host,
            title,
            attached_files,
            status: RoomStatus::Waiting,
            created_at,
        }
    }

    /// Append a member. Returns `false` if the username was already present.
    pub fn add_member(&mut self, username: Username) -> bool {
        if self.has_member(&username) {
            return false;
        }
        self.members.push(username);
        true
    }

    /// Remove a member. Returns `false` if the username was not present.
    pub fn remove_member(&mut self, username: &Username) -> bool {
        let before = self.members.len();
        self.members.retain(|member| member != username);
        self.members.len() != before
    }

    pub fn has_member(&self, username: &Username) -> bool {
        self.members.iter().any(|member| member == username)
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member names in join order.
    pub fn member_names(&self) -> Vec<String> {
        self.members
            .iter()
            .map(|member| member.as_str().to_string())
            .collect()
    }

    pub fn summary(&self) -> RoomSummary {
        RoomSummary {
            code: self.code.clone(),
            title: self.title.clone(),
            host: self.host.clone(),
            member_count: self.members.len(),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Read-only listing view of a room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSummary {
    pub code: RoomCode,
    pub title: String,
    pub host: Username,
    pub member_count: usize,
    pub status: RoomStatus,
    pub created_at: Timestamp,
}
