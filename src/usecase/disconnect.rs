//! UseCase: connection teardown.

use std::sync::Arc;

use crate::domain::{ChatHistory, ConnectionId, MessagePusher, RoomRegistry};

use super::presence::PresenceTracker;

/// Settles every room a departing connection was part of, then releases the
/// connection's transport resources.
///
/// Each room is settled through the pusher's atomic `leave_room`: removal from
/// the transport group and the resulting size come from one locked operation,
/// so when two members of the same room disconnect at once exactly one of them
/// observes zero and performs the teardown. Rooms whose count reaches zero are
/// torn down: registry entry and chat history both dropped, which is the
/// ephemeral-deployment lifecycle.
pub struct DisconnectUseCase {
    registry: Arc<dyn RoomRegistry>,
    chat_history: Arc<dyn ChatHistory>,
    message_pusher: Arc<dyn MessagePusher>,
    presence: Arc<PresenceTracker>,
}

impl DisconnectUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        chat_history: Arc<dyn ChatHistory>,
        message_pusher: Arc<dyn MessagePusher>,
        presence: Arc<PresenceTracker>,
    ) -> Self {
        Self {
            registry,
            chat_history,
            message_pusher,
            presence,
        }
    }

    pub async fn execute(&self, connection_id: ConnectionId) {
        let rooms = self.message_pusher.rooms_of(&connection_id).await;
        for room_id in &rooms {
            let remaining = self.message_pusher.leave_room(room_id, connection_id).await;
            self.presence.announce_count(room_id, remaining).await;
            if remaining == 0 {
                self.registry.remove(room_id).await;
                self.chat_history.clear(room_id).await;
                tracing::info!("Room '{}' emptied and torn down", room_id);
            }
        }
        self.message_pusher
            .unregister_connection(&connection_id)
            .await;
        tracing::info!("Connection '{}' disconnected", connection_id);
    }
}
