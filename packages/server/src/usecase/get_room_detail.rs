//! UseCase: ルーム詳細取得

use std::sync::Arc;

use crate::domain::{Room, RoomCode, RoomRepository};

use super::error::GetRoomDetailError;

/// ルーム詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    /// 新しい GetRoomDetailUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// ルーム詳細を取得
    ///
    /// # Arguments
    ///
    /// * `room_code` - ルームコード（パスパラメータの文字列）
    ///
    /// # Returns
    ///
    /// * `Ok(Room)` - ルームの現在の状態
    /// * `Err(GetRoomDetailError::RoomNotFound)` - コードが空、またはルームが存在しない
    pub async fn execute(&self, room_code: String) -> Result<Room, GetRoomDetailError> {
        let code = RoomCode::try_from(room_code).map_err(|_| GetRoomDetailError::RoomNotFound)?;
        self.repository
            .get(&code)
            .await
            .ok_or(GetRoomDetailError::RoomNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{code, create_test_repository, user};

    #[tokio::test]
    async fn test_get_room_detail_success() {
        // テスト項目: 存在するルームの詳細（メンバー・ホスト・タイトル）を取得できる
        // given (前提条件):
        let (repository, _sink, _worker) = create_test_repository();
        repository
            .create_room(
                code("R1"),
                "Rust quiz".to_string(),
                user("alice"),
                vec!["questions.pdf".to_string()],
            )
            .await
            .unwrap();
        repository.join_room(&code("R1"), user("bob")).await.unwrap();
        let usecase = GetRoomDetailUseCase::new(Arc::new(repository));

        // when (操作):
        let room = usecase.execute("R1".to_string()).await.unwrap();

        // then (期待する結果):
        assert_eq!(room.title, "Rust quiz");
        assert_eq!(room.host, user("alice"));
        assert_eq!(room.member_names(), vec!["alice", "bob"]);
        assert_eq!(room.attached_files, vec!["questions.pdf".to_string()]);
        assert_eq!(room.created_at.value(), 1000);
    }

    #[tokio::test]
    async fn test_get_room_detail_not_found() {
        // テスト項目: 存在しないルーム、空のコードは RoomNotFound になる
        // given (前提条件):
        let (repository, _sink, _worker) = create_test_repository();
        let usecase = GetRoomDetailUseCase::new(Arc::new(repository));

        // when (操作):
        let missing = usecase.execute("NOPE".to_string()).await;
        let blank = usecase.execute("  ".to_string()).await;

        // then (期待する結果):
        assert_eq!(missing, Err(GetRoomDetailError::RoomNotFound));
        assert_eq!(blank, Err(GetRoomDetailError::RoomNotFound));
    }
}
