//! Client-side session state that survives reconnects.

use quizroom_shared::protocol::ServerEvent;

const ROOM_GONE_MESSAGE: &str = "Room no longer exists";

/// Who we are and which room we are in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientState {
    pub username: String,
    pub current_room: Option<String>,
}

impl ClientState {
    pub fn new(username: String) -> Self {
        Self {
            username,
            current_room: None,
        }
    }

    /// Track the current room from a server event.
    ///
    /// `room_created` and `room_joined` set it; a failed resume clears it.
    pub fn apply(&mut self, event: &ServerEvent) {
        match event {
            ServerEvent::RoomCreated { room_code, .. } | ServerEvent::RoomJoined { room_code, .. } => {
                self.current_room = Some(room_code.clone());
            }
            ServerEvent::Error { message } if message == ROOM_GONE_MESSAGE => {
                self.current_room = None;
            }
            _ => {}
        }
    }

    pub fn leave_room(&mut self) {
        self.current_room = None;
    }
}
