//! WebSocket-backed `MessagePusher` implementation.
//!
//! The UI layer accepts WebSocket connections and produces an
//! `UnboundedSender` per connection; this implementation owns those senders
//! plus the room-group membership sets, and performs all push and fan-out.
//! Splitting "accepting the socket" from "sending on it" keeps the transport
//! bookkeeping in one place.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, PusherChannel, RoomId};

#[derive(Default)]
struct PusherState {
    /// Outbound channel per live connection.
    connections: HashMap<ConnectionId, PusherChannel>,
    /// Room-group membership: the authoritative source for presence counts.
    groups: HashMap<RoomId, HashSet<ConnectionId>>,
}

/// WebSocket `MessagePusher`.
pub struct WebSocketMessagePusher {
    state: Mutex<PusherState>,
}

impl WebSocketMessagePusher {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PusherState::default()),
        }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut state = self.state.lock().await;
        state.connections.insert(connection_id, sender);
        tracing::debug!("Connection '{}' registered", connection_id);
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        let mut state = self.state.lock().await;
        state.connections.remove(connection_id);
        for members in state.groups.values_mut() {
            members.remove(connection_id);
        }
        state.groups.retain(|_, members| !members.is_empty());
        tracing::debug!("Connection '{}' unregistered", connection_id);
    }

    async fn join_room(&self, room_id: &RoomId, connection_id: ConnectionId) {
        let mut state = self.state.lock().await;
        state
            .groups
            .entry(room_id.clone())
            .or_default()
            .insert(connection_id);
    }

    async fn leave_room(&self, room_id: &RoomId, connection_id: ConnectionId) -> usize {
        let mut state = self.state.lock().await;
        let Some(members) = state.groups.get_mut(room_id) else {
            return 0;
        };
        members.remove(&connection_id);
        let remaining = members.len();
        if remaining == 0 {
            state.groups.remove(room_id);
        }
        remaining
    }

    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomId> {
        let state = self.state.lock().await;
        state
            .groups
            .iter()
            .filter(|(_, members)| members.contains(connection_id))
            .map(|(room_id, _)| room_id.clone())
            .collect()
    }

    async fn room_size(&self, room_id: &RoomId) -> usize {
        let state = self.state.lock().await;
        state.groups.get(room_id).map_or(0, HashSet::len)
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let state = self.state.lock().await;
        let sender = state
            .connections
            .get(connection_id)
            .ok_or_else(|| MessagePushError::ConnectionNotFound(connection_id.to_string()))?;
        sender
            .send(content.to_string())
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))
    }

    async fn broadcast_to_room(
        &self,
        room_id: &RoomId,
        exclude: Option<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let state = self.state.lock().await;
        let Some(members) = state.groups.get(room_id) else {
            return Ok(());
        };
        for member in members {
            if Some(*member) == exclude {
                continue;
            }
            match state.connections.get(member) {
                Some(sender) => {
                    if let Err(e) = sender.send(content.to_string()) {
                        tracing::warn!("Failed to push to connection '{}': {}", member, e);
                    }
                }
                None => {
                    tracing::warn!("Connection '{}' missing during broadcast, skipping", member);
                }
            }
        }
        Ok(())
    }
}
