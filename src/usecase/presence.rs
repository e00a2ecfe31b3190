//! Presence tracking.
//!
//! Membership counts are always derived from the pusher's room-group
//! bookkeeping, never counted independently, so presence cannot drift from the
//! transport's own view of who is connected.

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomId};
use crate::infrastructure::dto::websocket::ServerEvent;

/// Derives live membership counts and broadcasts `roomMembers` events.
pub struct PresenceTracker {
    message_pusher: Arc<dyn MessagePusher>,
}

impl PresenceTracker {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    /// Current number of connections joined to the room.
    pub async fn member_count(&self, room_id: &RoomId) -> usize {
        self.message_pusher.room_size(room_id).await
    }

    /// Broadcast the current member count to the whole room (including the
    /// newest member). Returns the count that was announced.
    pub async fn broadcast_member_count(&self, room_id: &RoomId) -> usize {
        let count = self.member_count(room_id).await;
        self.announce_count(room_id, count).await;
        count
    }

    /// Broadcast a count the caller has already settled, to every current
    /// member of the room.
    ///
    /// Departures use this: the disconnect flow removes the departing
    /// connection from the transport group first and announces the size that
    /// removal returned, so the count and the recipient set always agree.
    pub async fn announce_count(&self, room_id: &RoomId, count: usize) {
        let event = ServerEvent::RoomMembers { count };
        if let Err(e) = self
            .message_pusher
            .broadcast_to_room(room_id, None, &event.to_json())
            .await
        {
            tracing::warn!("Failed to broadcast member count for '{}': {}", room_id, e);
        }
    }
}
