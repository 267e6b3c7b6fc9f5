//! InMemory Connection Registry 実装
//!
//! 接続ハンドル → バインディング（username, roomCode）のマップ。
//! `None` は匿名状態（接続直後、または退出後）を表します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{Binding, ConnectionHandle, ConnectionRegistry, RegistryError, RoomCode, Username};

#[derive(Default)]
pub struct InMemoryConnectionRegistry {
    entries: RwLock<HashMap<ConnectionHandle, Option<Binding>>>,
}

impl InMemoryConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登録済みの接続数を取得
    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[async_trait]
impl ConnectionRegistry for InMemoryConnectionRegistry {
    async fn register(&self, handle: ConnectionHandle) -> Result<(), RegistryError> {
        let mut entries = self.entries.write().await;
        if entries.contains_key(&handle) {
            return Err(RegistryError::DuplicateHandle(handle.to_string()));
        }
        entries.insert(handle, None);
        tracing::debug!("Connection '{}' registered", handle);
        Ok(())
    }

    async fn bind(
        &self,
        handle: &ConnectionHandle,
        username: Username,
        room_code: RoomCode,
    ) -> Result<(), RegistryError> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .get_mut(handle)
            .ok_or_else(|| RegistryError::UnknownHandle(handle.to_string()))?;
        tracing::debug!(
            "Connection '{}' bound to ('{}', '{}')",
            handle,
            username.as_str(),
            room_code.as_str()
        );
        *entry = Some(Binding {
            username,
            room_code,
        });
        Ok(())
    }

    async fn lookup(&self, handle: &ConnectionHandle) -> Option<Binding> {
        let entries = self.entries.read().await;
        entries.get(handle).cloned().flatten()
    }

    async fn unbind(&self, handle: &ConnectionHandle) -> Option<Binding> {
        let mut entries = self.entries.write().await;
        entries.get_mut(handle).and_then(Option::take)
    }

    async fn unregister(&self, handle: &ConnectionHandle) {
        let mut entries = self.entries.write().await;
        if entries.remove(handle).is_some() {
            tracing::debug!("Connection '{}' unregistered", handle);
        }
    }

    async fn contains(&self, handle: &ConnectionHandle) -> bool {
        self.entries.read().await.contains_key(handle)
    }

    async fn handles_in_room(&self, room_code: &RoomCode) -> Vec<ConnectionHandle> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|(_, binding)| {
                binding
                    .as_ref()
                    .is_some_and(|binding| &binding.room_code == room_code)
            })
            .map(|(handle, _)| *handle)
            .collect()
    }

    async fn handles_bound_as(
        &self,
        username: &Username,
        room_code: &RoomCode,
    ) -> Vec<ConnectionHandle> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|(_, binding)| {
                binding.as_ref().is_some_and(|binding| {
                    &binding.username == username && &binding.room_code == room_code
                })
            })
            .map(|(handle, _)| *handle)
            .collect()
    }
}
