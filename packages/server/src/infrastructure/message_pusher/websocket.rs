//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ハンドルごとの `UnboundedSender` を管理
//! - `Notification` をワイヤー形式の JSON に変換して送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui::handler::websocket`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//! 送信はチャンネルへの投入のみで、ソケットへの書き込みは接続ごとのタスクが行うため、
//! 同一接続への送信順序は投入順序と一致します。

use std::collections::HashMap;

use async_trait::async_trait;
use quizroom_shared::protocol::ServerEvent;
use tokio::sync::RwLock;

use crate::domain::{
    ConnectionHandle, MessagePushError, MessagePusher, Notification, PusherChannel,
};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// Key: 接続ハンドル / Value: 送信チャンネル
    clients: RwLock<HashMap<ConnectionHandle, PusherChannel>>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self::default()
    }

    fn encode(notification: &Notification) -> Result<String, MessagePushError> {
        let event: ServerEvent = notification.clone().into();
        serde_json::to_string(&event).map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, handle: ConnectionHandle, sender: PusherChannel) {
        let mut clients = self.clients.write().await;
        clients.insert(handle, sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", handle);
    }

    async fn unregister_client(&self, handle: &ConnectionHandle) {
        let mut clients = self.clients.write().await;
        clients.remove(handle);
        tracing::debug!("Connection '{}' unregistered from MessagePusher", handle);
    }

    async fn push_to(
        &self,
        handle: &ConnectionHandle,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(notification)?;
        let clients = self.clients.read().await;

        let sender = clients
            .get(handle)
            .ok_or_else(|| MessagePushError::ClientNotFound(handle.to_string()))?;
        sender
            .send(content)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection '{}'", handle);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionHandle>,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let content = Self::encode(notification)?;
        let clients = self.clients.read().await;

        for target in targets {
            match clients.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                Some(sender) => {
                    if let Err(e) = sender.send(content.clone()) {
                        tracing::warn!("Failed to push message to connection '{}': {}", target, e);
                    } else {
                        tracing::debug!("Broadcasted message to connection '{}'", target);
                    }
                }
                None => {
                    tracing::warn!(
                        "Connection '{}' not found during broadcast, skipping",
                        target
                    );
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - push_to: 特定の接続への送信
    // - broadcast: 複数接続への送信（部分失敗の許容）
    //
    // 【どのようなシナリオをテストするか】
    // 1. push_to の成功ケース（ワイヤー形式の JSON が届く）
    // 2. push_to の失敗ケース（接続が存在しない）
    // 3. broadcast の成功ケース
    // 4. broadcast の部分失敗ケース（一部の接続が存在しない・切断済み）
    // ========================================

    fn parse(frame: Option<String>) -> ServerEvent {
        serde_json::from_str(&frame.expect("frame should be delivered")).unwrap()
    }

    #[tokio::test]
    async fn test_push_to_success() {
        // テスト項目: 特定の接続にワイヤー形式のメッセージを送信できる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = ConnectionHandle::generate();
        pusher.register_client(handle, tx).await;

        // when (操作):
        let result = pusher
            .push_to(&handle, &Notification::RoomActive {
                room_code: "R1".to_string(),
            })
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            parse(rx.recv().await),
            ServerEvent::RoomActive {
                room_code: "R1".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_push_to_client_not_found() {
        // テスト項目: 存在しない接続への送信はエラーを返す
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let handle = ConnectionHandle::generate();

        // when (操作):
        let result = pusher.push_to(&handle, &Notification::GameStarted).await;

        // then (期待する結果):
        assert!(matches!(result, Err(MessagePushError::ClientNotFound(_))));
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: 複数の接続にメッセージをブロードキャストできる
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        let alice = ConnectionHandle::generate();
        let bob = ConnectionHandle::generate();
        pusher.register_client(alice, tx1).await;
        pusher.register_client(bob, tx2).await;

        // when (操作):
        let result = pusher
            .broadcast(vec![alice, bob], &Notification::GameStarted)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(parse(rx1.recv().await), ServerEvent::GameStarted);
        assert_eq!(parse(rx2.recv().await), ServerEvent::GameStarted);
    }

    #[tokio::test]
    async fn test_broadcast_partial_failure() {
        // テスト項目: 一部の接続が存在しない・切断済みでもブロードキャストは成功する
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, rx2) = mpsc::unbounded_channel();
        let alice = ConnectionHandle::generate();
        let closed = ConnectionHandle::generate();
        let unknown = ConnectionHandle::generate();
        pusher.register_client(alice, tx1).await;
        pusher.register_client(closed, tx2).await;
        drop(rx2);

        // when (操作):
        let result = pusher
            .broadcast(vec![alice, closed, unknown], &Notification::GameStarted)
            .await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(parse(rx1.recv().await), ServerEvent::GameStarted);
    }

    #[tokio::test]
    async fn test_unregistered_client_receives_nothing() {
        // テスト項目: 登録解除した接続にはメッセージが届かない
        // given (前提条件):
        let pusher = WebSocketMessagePusher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = ConnectionHandle::generate();
        pusher.register_client(handle, tx).await;
        pusher.unregister_client(&handle).await;

        // when (操作):
        let result = pusher.push_to(&handle, &Notification::GameStarted).await;

        // then (期待する結果):
        assert!(result.is_err());
        assert!(rx.recv().await.is_none());
    }
}
