//! Event Broadcaster.
//!
//! Delivers notifications to one connection or to every connection bound to a
//! room in the Connection Registry. Delivery is attempted once; failures are
//! logged and never reported back to the caller.

use std::sync::Arc;

use crate::domain::{ConnectionHandle, ConnectionRegistry, MessagePusher, Notification, RoomCode};

use super::outbound::{Outbound, Target};

pub struct EventBroadcaster {
    registry: Arc<dyn ConnectionRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl EventBroadcaster {
    pub fn new(
        registry: Arc<dyn ConnectionRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    pub async fn send_to_connection(&self, handle: &ConnectionHandle, notification: &Notification) {
        if let Err(e) = self.message_pusher.push_to(handle, notification).await {
            tracing::warn!("Failed to send to connection '{}': {}", handle, e);
        }
    }

    /// Fan out to every handle currently bound to `room_code`.
    pub async fn send_to_room(&self, room_code: &RoomCode, notification: &Notification) {
        let targets = self.registry.handles_in_room(room_code).await;
        if targets.is_empty() {
            tracing::debug!("No connections bound to room '{}'", room_code.as_str());
            return;
        }

        if let Err(e) = self.message_pusher.broadcast(targets, notification).await {
            tracing::warn!("Failed to broadcast to room '{}': {}", room_code.as_str(), e);
        }
    }

    /// Deliver outbound events in order.
    pub async fn deliver(&self, outbounds: &[Outbound]) {
        for outbound in outbounds {
            match &outbound.target {
                Target::Connection(handle) => {
                    self.send_to_connection(handle, &outbound.notification)
                        .await
                }
                Target::Room(room_code) => {
                    self.send_to_room(room_code, &outbound.notification).await
                }
            }
        }
    }

    pub fn message_pusher(&self) -> &Arc<dyn MessagePusher> {
        &self.message_pusher
    }
}
