//! Message delivery interface.

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{ConnectionHandle, MessagePushError, Notification};

/// Outbound channel of one connection. Carries serialized frames.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Delivers notifications to connections, fire-and-forget.
#[async_trait]
pub trait MessagePusher: Send + Sync {
    async fn register_client(&self, handle: ConnectionHandle, sender: PusherChannel);

    async fn unregister_client(&self, handle: &ConnectionHandle);

    /// Push to a single connection.
    async fn push_to(
        &self,
        handle: &ConnectionHandle,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// Push to every target. Individual failures are tolerated.
    async fn broadcast(
        &self,
        targets: Vec<ConnectionHandle>,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;
}
