//! Message pusher trait seam.
//!
//! Abstracts the transport layer: per-connection outbound channels plus the
//! room-group primitive used for fan-out and presence. The WebSocket
//! implementation lives in the infrastructure layer.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::mpsc;

use super::{ConnectionId, MessagePushError, RoomId};

/// Channel used to push serialized events to a single connection.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Transport-side connection and room-group bookkeeping.
///
/// Room groups are the single source of truth for presence: membership counts
/// are always derived from `room_size`, never counted independently, so the
/// tracker cannot drift from the transport's own view.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// Register a connection's outbound channel.
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// Remove a connection and its room-group memberships.
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// Add a connection to a room group.
    async fn join_room(&self, room_id: &RoomId, connection_id: ConnectionId);

    /// Remove a connection from a room group and return the group's remaining
    /// size, in one atomic step.
    ///
    /// Teardown decisions must key on this return value: reading `room_size`
    /// separately and subtracting would let two concurrent departures both
    /// observe the pre-removal size and neither see the group hit zero.
    async fn leave_room(&self, room_id: &RoomId, connection_id: ConnectionId) -> usize;

    /// Rooms the connection is currently joined to.
    async fn rooms_of(&self, connection_id: &ConnectionId) -> Vec<RoomId>;

    /// Number of connections currently joined to the room group.
    async fn room_size(&self, room_id: &RoomId) -> usize;

    /// Push a serialized event to a single connection.
    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), MessagePushError>;

    /// Push a serialized event to every connection in the room group, minus
    /// the excluded connection if one is given (echo suppression).
    ///
    /// Individual send failures are tolerated; a slow or vanished peer must
    /// not block the rest of the room.
    async fn broadcast_to_room(
        &self,
        room_id: &RoomId,
        exclude: Option<ConnectionId>,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
