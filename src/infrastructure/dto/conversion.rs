//! Conversion logic between DTOs and domain entities.

use crate::domain::ChatMessage;
use crate::infrastructure::dto::websocket as dto;

impl From<ChatMessage> for dto::ChatMessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            sender: model.sender,
            timestamp: model.timestamp.value(),
            text: model.text.into_string(),
        }
    }
}

impl From<&ChatMessage> for dto::ChatMessageDto {
    fn from(model: &ChatMessage) -> Self {
        model.clone().into()
    }
}
