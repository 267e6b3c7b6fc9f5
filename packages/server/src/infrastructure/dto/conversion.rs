//! Conversion logic between DTOs and domain types.

use quizroom_shared::{
    protocol::{ClientEvent, ServerEvent},
    time::timestamp_to_rfc3339,
};

use crate::{
    domain::{Command, Notification, Room, RoomCode, RoomSummary, Username, ValueObjectError},
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
};

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<ClientEvent> for Command {
    type Error = ValueObjectError;

    fn try_from(event: ClientEvent) -> Result<Self, Self::Error> {
        let command = match event {
            ClientEvent::CreateRoom {
                room_code,
                quiz_title,
                creator,
                files,
            } => Command::CreateRoom {
                code: RoomCode::new(room_code)?,
                title: quiz_title,
                creator: Username::new(creator)?,
                files,
            },
            ClientEvent::JoinRoom {
                username,
                room_code,
            } => Command::JoinRoom {
                username: Username::new(username)?,
                code: RoomCode::new(room_code)?,
            },
            ClientEvent::LeaveRoom {
                username,
                room_code,
            } => Command::LeaveRoom {
                username: Username::new(username)?,
                code: RoomCode::new(room_code)?,
            },
            ClientEvent::RejoinRoom {
                username,
                room_code,
            } => Command::RejoinRoom {
                username: Username::new(username)?,
                code: RoomCode::new(room_code)?,
            },
            ClientEvent::StartGame { room_code } => Command::StartGame {
                code: RoomCode::new(room_code)?,
            },
            ClientEvent::PingRoom { room_code } => Command::PingRoom {
                code: RoomCode::new(room_code)?,
            },
        };
        Ok(command)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<Notification> for ServerEvent {
    fn from(notification: Notification) -> Self {
        match notification {
            Notification::ConnectionSuccess { message } => Self::ConnectionSuccess { message },
            Notification::RoomCreated {
                room_code,
                creator,
                quiz_title,
                users,
            } => Self::RoomCreated {
                room_code,
                creator,
                quiz_title,
                users,
            },
            Notification::RoomJoined {
                room_code,
                quiz_title,
                users,
                host,
            } => Self::RoomJoined {
                room_code,
                quiz_title,
                users,
                host,
            },
            Notification::UserJoined { username, users } => Self::UserJoined { username, users },
            Notification::UserLeft { username, users } => Self::UserLeft { username, users },
            Notification::GameStarted => Self::GameStarted,
            Notification::RoomActive { room_code } => Self::RoomActive { room_code },
            Notification::Error { message } => Self::Error { message },
        }
    }
}

impl From<RoomSummary> for RoomSummaryDto {
    fn from(summary: RoomSummary) -> Self {
        Self {
            code: summary.code.into_string(),
            title: summary.title,
            host: summary.host.into_string(),
            member_count: summary.member_count,
            status: summary.status,
            created_at: timestamp_to_rfc3339(summary.created_at.value()),
        }
    }
}

impl From<Room> for RoomDetailDto {
    fn from(room: Room) -> Self {
        Self {
            members: room.member_names(),
            code: room.code.into_string(),
            title: room.title,
            host: room.host.into_string(),
            files: room.attached_files,
            status: room.status,
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RoomStatus, Timestamp};

    #[test]
    fn test_client_event_to_command() {
        // テスト項目: create_room イベントが検証済みのコマンドに変換される
        // given (前提条件):
        let event = ClientEvent::CreateRoom {
            room_code: "R1".to_string(),
            quiz_title: "Rust".to_string(),
            creator: "alice".to_string(),
            files: vec!["a.pdf".to_string()],
        };

        // when (操作):
        let command = Command::try_from(event).unwrap();

        // then (期待する結果):
        assert_eq!(
            command,
            Command::CreateRoom {
                code: RoomCode::new("R1".to_string()).unwrap(),
                title: "Rust".to_string(),
                creator: Username::new("alice".to_string()).unwrap(),
                files: vec!["a.pdf".to_string()],
            }
        );
    }

    #[test]
    fn test_client_event_with_empty_username_is_rejected() {
        // テスト項目: ユーザー名が空の join_room は変換エラーになる
        // given (前提条件):
        let event = ClientEvent::JoinRoom {
            username: "".to_string(),
            room_code: "R1".to_string(),
        };

        // when (操作):
        let result = Command::try_from(event);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyUsername));
    }

    #[test]
    fn test_client_event_with_empty_room_code_is_rejected() {
        // テスト項目: ルームコードが空の ping_room は変換エラーになる
        // given (前提条件):
        let event = ClientEvent::PingRoom {
            room_code: "".to_string(),
        };

        // when (操作):
        let result = Command::try_from(event);

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyRoomCode));
    }

    #[test]
    fn test_notification_to_server_event() {
        // テスト項目: user_left 通知がワイヤー形式のイベントに変換される
        // given (前提条件):
        let notification = Notification::UserLeft {
            username: "carol".to_string(),
            users: vec!["alice".to_string()],
        };

        // when (操作):
        let event: ServerEvent = notification.into();

        // then (期待する結果):
        assert_eq!(
            event,
            ServerEvent::UserLeft {
                username: "carol".to_string(),
                users: vec!["alice".to_string()],
            }
        );
    }

    #[test]
    fn test_room_to_detail_dto() {
        // テスト項目: Room が詳細 DTO に変換される
        // given (前提条件):
        let mut room = Room::new(
            RoomCode::new("R1".to_string()).unwrap(),
            "Rust".to_string(),
            Username::new("alice".to_string()).unwrap(),
            vec!["a.pdf".to_string()],
            Timestamp::new(1672531200000),
        );
        room.add_member(Username::new("bob".to_string()).unwrap());

        // when (操作):
        let dto: RoomDetailDto = room.into();

        // then (期待する結果):
        assert_eq!(dto.code, "R1");
        assert_eq!(dto.members, vec!["alice", "bob"]);
        assert_eq!(dto.files, vec!["a.pdf"]);
        assert_eq!(dto.status, RoomStatus::Waiting);
        assert!(dto.created_at.starts_with("2023-01-01T00:00:00"));
    }
}
