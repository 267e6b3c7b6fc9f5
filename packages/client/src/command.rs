//! Parsing of terminal input into room events.

use quizroom_shared::protocol::ClientEvent;

use crate::error::CommandError;

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Send this event to the server
    Send(ClientEvent),
    Help,
    Quit,
}

/// Parse one input line
///
/// # Arguments
///
/// * `line` - The trimmed input line
/// * `username` - Our username, used for events that carry one
/// * `current_room` - The room we are in, if any
pub fn parse_input(
    line: &str,
    username: &str,
    current_room: Option<&str>,
) -> Result<InputCommand, CommandError> {
    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or_default();

    match head {
        "/create" => {
            let room_code = parts
                .next()
                .ok_or(CommandError::Usage("/create <code> <title...>"))?;
            let quiz_title = parts.collect::<Vec<_>>().join(" ");
            if quiz_title.is_empty() {
                return Err(CommandError::Usage("/create <code> <title...>"));
            }
            Ok(InputCommand::Send(ClientEvent::CreateRoom {
                room_code: room_code.to_string(),
                quiz_title,
                creator: username.to_string(),
                files: vec![],
            }))
        }
        "/join" => {
            let room_code = parts.next().ok_or(CommandError::Usage("/join <code>"))?;
            Ok(InputCommand::Send(ClientEvent::JoinRoom {
                username: username.to_string(),
                room_code: room_code.to_string(),
            }))
        }
        "/leave" => {
            let room_code = current_room.ok_or(CommandError::NotInRoom)?;
            Ok(InputCommand::Send(ClientEvent::LeaveRoom {
                username: username.to_string(),
                room_code: room_code.to_string(),
            }))
        }
        "/start" => {
            let room_code = current_room.ok_or(CommandError::NotInRoom)?;
            Ok(InputCommand::Send(ClientEvent::StartGame {
                room_code: room_code.to_string(),
            }))
        }
        "/ping" => {
            let room_code = current_room.ok_or(CommandError::NotInRoom)?;
            Ok(InputCommand::Send(ClientEvent::PingRoom {
                room_code: room_code.to_string(),
            }))
        }
        "/help" => Ok(InputCommand::Help),
        "/quit" => Ok(InputCommand::Quit),
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_create_with_multi_word_title() {
        // テスト項目: /create はコードと複数単語のタイトルから create_room を作る
        // given (前提条件):
        let line = "/create R1 Rust   ownership basics";

        // when (操作):
        let result = parse_input(line, "alice", None);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(InputCommand::Send(ClientEvent::CreateRoom {
                room_code: "R1".to_string(),
                quiz_title: "Rust ownership basics".to_string(),
                creator: "alice".to_string(),
                files: vec![],
            }))
        );
    }

    #[test]
    fn test_parse_create_without_title() {
        // テスト項目: タイトルの無い /create は使い方のエラーになる
        // given (前提条件):
        let line = "/create R1";

        // when (操作):
        let result = parse_input(line, "alice", None);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(CommandError::Usage("/create <code> <title...>"))
        );
    }

    #[test]
    fn test_parse_join() {
        // テスト項目: /join <code> は自分のユーザー名で join_room を作る
        // given (前提条件):
        let line = "/join R1";

        // when (操作):
        let result = parse_input(line, "bob", None);

        // then (期待する結果):
        assert_eq!(
            result,
            Ok(InputCommand::Send(ClientEvent::JoinRoom {
                username: "bob".to_string(),
                room_code: "R1".to_string(),
            }))
        );
        assert_eq!(
            parse_input("/join", "bob", None),
            Err(CommandError::Usage("/join <code>"))
        );
    }

    #[test]
    fn test_room_commands_use_current_room() {
        // テスト項目: /leave /start /ping は現在のルームを対象にする
        // given (前提条件):
        let current_room = Some("R1");

        // when (操作):
        let leave = parse_input("/leave", "bob", current_room);
        let start = parse_input("/start", "bob", current_room);
        let ping = parse_input("/ping", "bob", current_room);

        // then (期待する結果):
        assert_eq!(
            leave,
            Ok(InputCommand::Send(ClientEvent::LeaveRoom {
                username: "bob".to_string(),
                room_code: "R1".to_string(),
            }))
        );
        assert_eq!(
            start,
            Ok(InputCommand::Send(ClientEvent::StartGame {
                room_code: "R1".to_string(),
            }))
        );
        assert_eq!(
            ping,
            Ok(InputCommand::Send(ClientEvent::PingRoom {
                room_code: "R1".to_string(),
            }))
        );
    }

    #[test]
    fn test_room_commands_outside_room() {
        // テスト項目: ルームに入っていない状態の /leave /start /ping はエラーになる
        // given (前提条件):
        let current_room = None;

        // when (操作):
        let results: Vec<_> = ["/leave", "/start", "/ping"]
            .iter()
            .map(|line| parse_input(line, "bob", current_room))
            .collect();

        // then (期待する結果):
        for result in results {
            assert_eq!(result, Err(CommandError::NotInRoom));
        }
    }

    #[test]
    fn test_parse_help_quit_and_unknown() {
        // テスト項目: /help /quit と未知の入力の解釈
        // given (前提条件):
        let username = "alice";

        // when (操作):
        let help = parse_input("/help", username, None);
        let quit = parse_input("/quit", username, None);
        let unknown = parse_input("hello", username, None);

        // then (期待する結果):
        assert_eq!(help, Ok(InputCommand::Help));
        assert_eq!(quit, Ok(InputCommand::Quit));
        assert_eq!(unknown, Err(CommandError::Unknown("hello".to_string())));
    }
}
