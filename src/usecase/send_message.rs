//! UseCase: chat message sending.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{ChatHistory, ChatMessage, MessagePusher, MessageText, RoomId, RoomRegistry, Timestamp};
use crate::infrastructure::dto::websocket::ServerEvent;

use super::error::SendMessageError;

/// Appends a chat message to the room's history and broadcasts it.
///
/// The broadcast includes the sender: the sender needs the server-assigned
/// timestamp for consistent rendering, which is why chat has no echo
/// suppression while code edits do.
pub struct SendMessageUseCase {
    registry: Arc<dyn RoomRegistry>,
    chat_history: Arc<dyn ChatHistory>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl SendMessageUseCase {
    pub fn new(
        registry: Arc<dyn RoomRegistry>,
        chat_history: Arc<dyn ChatHistory>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            chat_history,
            message_pusher,
            clock,
        }
    }

    /// Timestamp, store and broadcast a message. Returns the stored message.
    pub async fn execute(
        &self,
        room_id: RoomId,
        sender: String,
        text: MessageText,
    ) -> Result<ChatMessage, SendMessageError> {
        if !self.registry.exists(&room_id).await {
            return Err(SendMessageError::RoomNotFound);
        }

        let message = ChatMessage::new(sender, text, Timestamp::new(self.clock.now_millis()));
        self.chat_history.append(&room_id, message.clone()).await;

        let event = ServerEvent::ReceiveMessage {
            sender: message.sender.clone(),
            text: message.text.as_str().to_string(),
            timestamp: message.timestamp.value(),
        };
        if let Err(e) = self
            .message_pusher
            .broadcast_to_room(&room_id, None, &event.to_json())
            .await
        {
            tracing::warn!("Failed to broadcast chat message for '{}': {}", room_id, e);
        }
        Ok(message)
    }
}
