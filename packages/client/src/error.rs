//! Error types for the Quizroom client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Could not open the WebSocket connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// An established connection went away
    #[error("Connection lost")]
    ConnectionLost,

    /// Gave up after the maximum number of reconnect attempts
    #[error("Failed to reconnect after {0} attempts")]
    ReconnectFailed(u32),

    /// Failed to encode an outgoing event
    #[error("Failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Errors for input lines that can not be turned into an event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("You are not in a room. Use /create or /join first")]
    NotInRoom,

    #[error("Unknown command '{0}'. Type /help for the list of commands")]
    Unknown(String),
}
