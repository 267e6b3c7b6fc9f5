//! Shared application state.

use std::sync::Arc;

use crate::usecase::{GetRoomDetailUseCase, GetRoomsUseCase, SessionCoordinator};

/// Shared application state
pub struct AppState {
    /// SessionCoordinator（接続とルーム操作の調停）
    pub session_coordinator: Arc<SessionCoordinator>,
    /// GetRoomsUseCase（ルーム一覧取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetRoomDetailUseCase（ルーム詳細取得のユースケース）
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,
}
