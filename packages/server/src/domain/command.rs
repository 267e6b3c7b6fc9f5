//! Typed client intents, validated from wire events.

use super::{RoomCode, Username};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateRoom {
        code: RoomCode,
        title: String,
        creator: Username,
        files: Vec<String>,
    },
    JoinRoom {
        username: Username,
        code: RoomCode,
    },
    LeaveRoom {
        username: Username,
        code: RoomCode,
    },
    /// Restore membership after a transport-level reconnect.
    RejoinRoom {
        username: Username,
        code: RoomCode,
    },
    StartGame {
        code: RoomCode,
    },
    PingRoom {
        code: RoomCode,
    },
}

impl Command {
    /// Event name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::CreateRoom { .. } => "create_room",
            Self::JoinRoom { .. } => "join_room",
            Self::LeaveRoom { .. } => "leave_room",
            Self::RejoinRoom { .. } => "rejoin_room",
            Self::StartGame { .. } => "start_game",
            Self::PingRoom { .. } => "ping_room",
        }
    }
}
