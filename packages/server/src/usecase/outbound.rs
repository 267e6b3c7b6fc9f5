//! Outbound events returned by the session coordinator.

use crate::domain::{ConnectionHandle, Notification, RoomCode};

/// Who should receive a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// The single connection.
    Connection(ConnectionHandle),
    /// Every connection bound to the room at delivery time.
    Room(RoomCode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outbound {
    pub target: Target,
    pub notification: Notification,
}

impl Outbound {
    pub fn to_connection(handle: ConnectionHandle, notification: Notification) -> Self {
        Self {
            target: Target::Connection(handle),
            notification,
        }
    }

    pub fn to_room(room_code: RoomCode, notification: Notification) -> Self {
        Self {
            target: Target::Room(room_code),
            notification,
        }
    }
}
