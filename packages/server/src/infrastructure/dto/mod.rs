//! Data Transfer Objects (DTOs).
//!
//! - `http`: HTTP query API response DTOs
//! - `conversion`: conversions between wire events / DTOs and domain types
//!
//! WebSocket event DTOs live in `quizroom_shared::protocol`.

pub mod conversion;
pub mod http;
