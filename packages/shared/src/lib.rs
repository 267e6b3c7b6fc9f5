//! Code shared by the Quizroom server and client.
//!
//! - `protocol`: WebSocket event payloads exchanged between client and server
//! - `time`: clock abstraction and timestamp formatting
//! - `logger`: tracing subscriber setup

pub mod logger;
pub mod protocol;
pub mod time;
