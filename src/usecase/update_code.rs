//! UseCase: code buffer updates.

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, RoomId, RoomRegistry};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::error::UpdateCodeError;

/// Applies a full-buffer code overwrite and relays it to the rest of the room.
///
/// Echo suppression is the critical property here: the broadcast excludes the
/// originating transport connection, so a client never receives its own edit
/// back (which would retrigger its change handlers and risk feedback loops).
/// The client-supplied `sender_id` is relayed verbatim for client-side
/// deduplication but plays no part in the suppression decision.
pub struct UpdateCodeUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl UpdateCodeUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Overwrite the room's code (last writer wins) and broadcast to every
    /// connection in the room except `origin`.
    pub async fn execute(
        &self,
        room_id: RoomId,
        code: String,
        sender_id: String,
        origin: ConnectionId,
    ) -> Result<(), UpdateCodeError> {
        self.registry
            .set_code(&room_id, code.clone())
            .await
            .map_err(|_| UpdateCodeError::RoomNotFound)?;

        let event = ServerEvent::UpdatedCode {
            room_id: room_id.as_str().to_string(),
            code,
            sender_id,
        };
        if let Err(e) = self
            .message_pusher
            .broadcast_to_room(&room_id, Some(origin), &event.to_json())
            .await
        {
            tracing::warn!("Failed to relay code update for '{}': {}", room_id, e);
        }
        Ok(())
    }
}
