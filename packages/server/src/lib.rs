//! Quizroom room coordinator library.
//!
//! Clients create or join short-coded rooms over a WebSocket, and the server
//! keeps room membership consistent while fanning out room events.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

#[cfg(test)]
pub(crate) mod test_support;
