//! Message formatting utilities for client display.

use quizroom_shared::protocol::ServerEvent;

const SEPARATOR: &str = "============================================================";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a server event
    ///
    /// # Arguments
    ///
    /// * `event` - The event received from the server
    /// * `me` - Our username (to mark as "me")
    ///
    /// # Returns
    ///
    /// The text to print, or `None` for events that are not shown
    /// (keep-alive answers)
    pub fn format_event(event: &ServerEvent, me: &str) -> Option<String> {
        let formatted = match event {
            ServerEvent::ConnectionSuccess { message } => format!("\n* {}\n", message),
            ServerEvent::RoomCreated {
                room_code,
                creator,
                quiz_title,
                users,
            } => Self::format_room(
                &format!("Room {} created: {}", room_code, quiz_title),
                users,
                creator,
                me,
            ),
            ServerEvent::RoomJoined {
                room_code,
                quiz_title,
                users,
                host,
            } => Self::format_room(
                &format!("Joined room {}: {}", room_code, quiz_title),
                users,
                host,
                me,
            ),
            ServerEvent::UserJoined { username, users } => {
                format!("\n+ {} joined ({} in room)\n", username, users.len())
            }
            ServerEvent::UserLeft { username, users } => {
                format!("\n- {} left ({} in room)\n", username, users.len())
            }
            ServerEvent::GameStarted => "\n>>> The game has started!\n".to_string(),
            ServerEvent::RoomActive { .. } => return None,
            ServerEvent::Error { message } => format!("\n! Error: {}\n", message),
        };
        Some(formatted)
    }

    /// Format a room banner with its member list
    fn format_room(title: &str, users: &[String], host: &str, me: &str) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{}\n", SEPARATOR));
        output.push_str(&format!("{}\n", title));
        output.push_str("Members:\n");

        for user in users {
            let host_suffix = if user == host { " (host)" } else { "" };
            let me_suffix = if user == me { " (me)" } else { "" };
            output.push_str(&format!("  {}{}{}\n", user, host_suffix, me_suffix));
        }

        output.push_str(&format!("{}\n", SEPARATOR));
        output
    }

    /// Format the list of commands
    pub fn format_help() -> String {
        [
            "",
            "Commands:",
            "  /create <code> <title...>  create a room and become its host",
            "  /join <code>               join a room",
            "  /leave                     leave the current room",
            "  /start                     start the game in the current room",
            "  /ping                      check that the current room is still there",
            "  /help                      show this help",
            "  /quit                      exit",
            "",
        ]
        .join("\n")
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
