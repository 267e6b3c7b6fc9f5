//! Domain errors.

use thiserror::Error;

/// Invalid input for a value object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueObjectError {
    #[error("Room code must not be empty")]
    EmptyRoomCode,

    #[error("Username must not be empty")]
    EmptyUsername,
}

/// Room Table failures surfaced to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    /// The room code is already taken.
    #[error("Room '{0}' already exists")]
    AlreadyExists(String),

    /// No room with that code.
    #[error("Room '{0}' not found")]
    NotFound(String),
}

/// Connection Registry failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The transport handed out the same handle twice.
    #[error("Connection handle '{0}' is already registered")]
    DuplicateHandle(String),

    #[error("Connection handle '{0}' is not registered")]
    UnknownHandle(String),
}

/// Message delivery failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    #[error("Client '{0}' not found")]
    ClientNotFound(String),

    #[error("Failed to push message: {0}")]
    PushFailed(String),
}

/// Audit sink write failures.
#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("audit serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
