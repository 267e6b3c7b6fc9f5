//! UseCase errors.

use thiserror::Error;

use crate::domain::{RegistryError, RoomError};

/// Failures of a session intent.
///
/// Everything except `InvalidState` is an expected, user-facing outcome and is
/// reported to the originating connection as an `error` event. The `Display`
/// text is the message the client sees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Room already exists")]
    AlreadyExists(String),

    #[error("Room not found")]
    NotFound(String),

    /// The room a client tried to resume is gone.
    #[error("Room no longer exists")]
    NoLongerExists(String),

    /// Bug-indicating condition such as a duplicate handle registration.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl SessionError {
    /// Whether the connection that triggered this error should be dropped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

impl From<RoomError> for SessionError {
    fn from(error: RoomError) -> Self {
        match error {
            RoomError::AlreadyExists(code) => Self::AlreadyExists(code),
            RoomError::NotFound(code) => Self::NotFound(code),
        }
    }
}

impl From<RegistryError> for SessionError {
    fn from(error: RegistryError) -> Self {
        Self::InvalidState(error.to_string())
    }
}

/// Room detail query errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("Room not found")]
    RoomNotFound,
}
