//! Terminal client for Quizroom.
//!
//! Reads slash commands from the terminal, sends them as room events and
//! prints whatever the server broadcasts. Reconnects and resumes the current
//! room when the connection drops.

pub mod command;
pub mod error;
pub mod formatter;
mod runner;
mod session;
pub mod state;
mod ui;

pub use runner::run_client;
