//! Repository trait seams for the shared room state.
//!
//! The use case layer depends on these traits; the infrastructure layer
//! provides the in-memory implementations (dependency inversion).

use async_trait::async_trait;

use super::{ChatMessage, RegistryError, Room, RoomId};

/// Authoritative store of room existence and the current document snapshot.
///
/// The registry exclusively owns all `Room` records. `set_code` and
/// `set_language` are total overwrites: the last caller wins, and no version
/// vector or conflict detection exists by design.
#[async_trait]
pub trait RoomRegistry: Send + Sync {
    /// Insert a new room. Rejects ids that are already live.
    async fn create(&self, room: Room) -> Result<(), RegistryError>;

    /// Whether a room with this id currently exists.
    async fn exists(&self, room_id: &RoomId) -> bool;

    /// Snapshot of the room, if it exists.
    async fn get(&self, room_id: &RoomId) -> Option<Room>;

    /// Overwrite the full code buffer (last writer wins).
    async fn set_code(&self, room_id: &RoomId, code: String) -> Result<(), RegistryError>;

    /// Overwrite the language selection (last writer wins).
    async fn set_language(&self, room_id: &RoomId, language: String) -> Result<(), RegistryError>;

    /// Drop the room. Removing an absent room is a no-op (idempotent).
    async fn remove(&self, room_id: &RoomId);
}

/// Append-only per-room chat log, scoped to the room's lifetime.
#[async_trait]
pub trait ChatHistory: Send + Sync {
    /// Append a message to the room's log, creating the log if absent.
    async fn append(&self, room_id: &RoomId, message: ChatMessage);

    /// Full history in insertion order; empty when the room has no messages.
    async fn history(&self, room_id: &RoomId) -> Vec<ChatMessage>;

    /// Drop the room's log (room teardown).
    async fn clear(&self, room_id: &RoomId);
}
