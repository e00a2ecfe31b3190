//! UseCase: language selection changes.

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomId, RoomRegistry};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::error::ChangeLanguageError;

/// Overwrites the room's language and broadcasts the change.
///
/// Unlike code edits, the broadcast includes the sender: re-applying a
/// language change is idempotent on the client, so no echo suppression is
/// needed here.
pub struct ChangeLanguageUseCase {
    registry: Arc<dyn RoomRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ChangeLanguageUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    /// Overwrite the language (last writer wins) and broadcast to the whole
    /// room, sender included.
    pub async fn execute(
        &self,
        room_id: RoomId,
        language: String,
    ) -> Result<(), ChangeLanguageError> {
        self.registry
            .set_language(&room_id, language.clone())
            .await
            .map_err(|_| ChangeLanguageError::RoomNotFound)?;

        let event = ServerEvent::LanguageChange {
            room_id: room_id.as_str().to_string(),
            language,
        };
        if let Err(e) = self
            .message_pusher
            .broadcast_to_room(&room_id, None, &event.to_json())
            .await
        {
            tracing::warn!("Failed to broadcast language change for '{}': {}", room_id, e);
        }
        Ok(())
    }
}
