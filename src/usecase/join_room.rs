//! UseCase: joining a room.

use std::sync::Arc;

use crate::domain::{ChatHistory, ConnectionId, MessagePusher, RoomId, RoomRegistry};
use crate::infrastructure::dto::websocket::{SERVER_SENDER_ID, ServerEvent};

use super::error::JoinRoomError;
use super::presence::PresenceTracker;

/// Admits a connection into a room and replays the current state to it.
///
/// Absent rooms are rejected; nothing auto-creates a room on join, which also
/// removes the join/create check-then-act race between the two code paths.
pub struct JoinRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    chat_history: Arc<dyn ChatHistory>,
    message_pusher: Arc<dyn MessagePusher>,
    presence: Arc<PresenceTracker>,
}

impl JoinRoomUseCase {
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

    /// Join `connection_id` to the room.
    ///
    /// On success the joining connection receives, in order: the `roomJoined`
    /// acknowledgement, a full-document `updatedCode` snapshot tagged with the
    /// server sentinel sender id, the current `languageChange`, and the full
    /// `chatHistory`. The whole room (new member included) then receives the
    /// updated `roomMembers` count.
    pub async fn execute(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
    ) -> Result<(), JoinRoomError> {
        let room = self
            .registry
            .get(&room_id)
            .await
            .ok_or(JoinRoomError::RoomNotFound)?;

        self.message_pusher.join_room(&room_id, connection_id).await;

        let history = self.chat_history.history(&room_id).await;
        let snapshot = [
            ServerEvent::RoomJoined {
                room_id: room_id.as_str().to_string(),
            },
            ServerEvent::UpdatedCode {
                room_id: room_id.as_str().to_string(),
                code: room.code,
                sender_id: SERVER_SENDER_ID.to_string(),
            },
            ServerEvent::LanguageChange {
                room_id: room_id.as_str().to_string(),
                language: room.language,
            },
            ServerEvent::ChatHistory {
                messages: history.iter().map(Into::into).collect(),
            },
        ];
        for event in snapshot {
            if let Err(e) = self
                .message_pusher
                .push_to(&connection_id, &event.to_json())
                .await
            {
                // The joiner vanished mid-handshake; its disconnect hook will
                // settle the membership count.
                tracing::warn!("Failed to push join snapshot to '{}': {}", connection_id, e);
                return Ok(());
            }
        }

        let count = self.presence.broadcast_member_count(&room_id).await;
        tracing::info!(
            "Connection '{}' joined room '{}' ({} members)",
            connection_id,
            room_id,
            count
        );
        Ok(())
    }
}
