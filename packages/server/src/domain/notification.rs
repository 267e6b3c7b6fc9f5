//! Outbound notifications produced by the session coordinator.
//!
//! These are transport-agnostic; the message pusher turns them into wire frames.

/// A server-to-client event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    ConnectionSuccess {
        message: String,
    },
    RoomCreated {
        room_code: String,
        creator: String,
        quiz_title: String,
        users: Vec<String>,
    },
    RoomJoined {
        room_code: String,
        quiz_title: String,
        users: Vec<String>,
        host: String,
    },
    UserJoined {
        username: String,
        users: Vec<String>,
    },
    UserLeft {
        username: String,
        users: Vec<String>,
    },
    GameStarted,
    RoomActive {
        room_code: String,
    },
    Error {
        message: String,
    },
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}
