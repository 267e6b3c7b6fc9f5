//! UseCase layer.
//!
//! - `SessionCoordinator`: connection lifecycle and room intents
//! - `EventBroadcaster`: fan-out of outbound notifications
//! - `GetRoomsUseCase` / `GetRoomDetailUseCase`: read-only room queries

mod broadcaster;
mod error;
mod get_room_detail;
mod get_rooms;
mod outbound;
mod session_coordinator;

pub use broadcaster::EventBroadcaster;
pub use error::{GetRoomDetailError, SessionError};
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use outbound::{Outbound, Target};
pub use session_coordinator::SessionCoordinator;
