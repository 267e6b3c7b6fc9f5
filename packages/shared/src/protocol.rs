//! WebSocket event payloads.
//!
//! Every frame is a JSON object of the form `{"event": "<name>", "data": {...}}`.
//! Payload keys are camelCase.

use serde::{Deserialize, Serialize};

/// Events sent from a client to the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    CreateRoom {
        room_code: String,
        quiz_title: String,
        creator: String,
        #[serde(default)]
        files: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    JoinRoom { username: String, room_code: String },
    #[serde(rename_all = "camelCase")]
    LeaveRoom { username: String, room_code: String },
    #[serde(rename_all = "camelCase")]
    RejoinRoom { username: String, room_code: String },
    #[serde(rename_all = "camelCase")]
    StartGame { room_code: String },
    #[serde(rename_all = "camelCase")]
    PingRoom { room_code: String },
}

/// Events sent from the server to a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    ConnectionSuccess {
        message: String,
    },
    #[serde(rename_all = "camelCase")]
    RoomCreated {
        room_code: String,
        creator: String,
        quiz_title: String,
        users: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
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
    #[serde(rename_all = "camelCase")]
    RoomActive {
        room_code: String,
    },
    Error {
        message: String,
    },
}
