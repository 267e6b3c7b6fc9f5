//! Connection Registry interface.
//!
//! Maps a connection handle to the (username, room) it currently represents.
//! Only the session coordinator mutates entries.

use async_trait::async_trait;

use super::{ConnectionHandle, RegistryError, RoomCode, Username};

/// The (username, room) association attached to a handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub username: Username,
    pub room_code: RoomCode,
}

#[async_trait]
pub trait ConnectionRegistry: Send + Sync {
    /// Create an anonymous entry for a fresh handle.
    async fn register(&self, handle: ConnectionHandle) -> Result<(), RegistryError>;

    /// Overwrite the handle's binding. Room existence is not checked here.
    async fn bind(
        &self,
        handle: &ConnectionHandle,
        username: Username,
        room_code: RoomCode,
    ) -> Result<(), RegistryError>;

    /// Current binding, `None` when anonymous or unknown.
    async fn lookup(&self, handle: &ConnectionHandle) -> Option<Binding>;

    /// Reset the handle to anonymous and return the prior binding.
    async fn unbind(&self, handle: &ConnectionHandle) -> Option<Binding>;

    /// Remove the entry entirely.
    async fn unregister(&self, handle: &ConnectionHandle);

    /// Whether the handle has an entry, bound or not.
    async fn contains(&self, handle: &ConnectionHandle) -> bool;

    /// Every handle currently bound to `room_code`.
    async fn handles_in_room(&self, room_code: &RoomCode) -> Vec<ConnectionHandle>;

    /// Every handle currently bound to exactly (`username`, `room_code`).
    async fn handles_bound_as(
        &self,
        username: &Username,
        room_code: &RoomCode,
    ) -> Vec<ConnectionHandle>;
}
