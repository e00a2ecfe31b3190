//! In-memory `ChatHistory` implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ChatHistory, ChatMessage, RoomId};

/// Append-only per-room message log.
///
/// Unbounded by design: the log lives only as long as its room, and rooms are
/// ephemeral. A length cap would be a deliberate extension, not a default.
pub struct InMemoryChatHistory {
    messages: Mutex<HashMap<RoomId, Vec<ChatMessage>>>,
}

impl InMemoryChatHistory {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryChatHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatHistory for InMemoryChatHistory {
    async fn append(&self, room_id: &RoomId, message: ChatMessage) {
        let mut messages = self.messages.lock().await;
        messages.entry(room_id.clone()).or_default().push(message);
    }

    async fn history(&self, room_id: &RoomId) -> Vec<ChatMessage> {
        let messages = self.messages.lock().await;
        messages.get(room_id).cloned().unwrap_or_default()
    }

    async fn clear(&self, room_id: &RoomId) {
        let mut messages = self.messages.lock().await;
        messages.remove(room_id);
    }
}
