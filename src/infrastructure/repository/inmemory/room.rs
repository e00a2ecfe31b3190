//! In-memory `RoomRegistry` implementation.
//!
//! A `HashMap` behind a `tokio::sync::Mutex` serves as the store. The original
//! system relied on a single-threaded event loop for atomicity; on a
//! multi-threaded runtime the mutex restores the same guarantee per operation.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RegistryError, Room, RoomId, RoomRegistry};

/// In-memory room registry.
pub struct InMemoryRoomRegistry {
    rooms: Mutex<HashMap<RoomId, Room>>,
}

impl InMemoryRoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryRoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomRegistry for InMemoryRoomRegistry {
    async fn create(&self, room: Room) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;
        if rooms.contains_key(&room.id) {
            return Err(RegistryError::AlreadyExists(room.id.as_str().to_string()));
        }
        tracing::info!("Room '{}' created (owner: '{}')", room.id, room.owner);
        rooms.insert(room.id.clone(), room);
        Ok(())
    }

    async fn exists(&self, room_id: &RoomId) -> bool {
        let rooms = self.rooms.lock().await;
        rooms.contains_key(room_id)
    }

    async fn get(&self, room_id: &RoomId) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(room_id).cloned()
    }

    async fn set_code(&self, room_id: &RoomId, code: String) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::NotFound(room_id.as_str().to_string()))?;
        room.code = code;
        Ok(())
    }

    async fn set_language(&self, room_id: &RoomId, language: String) -> Result<(), RegistryError> {
        let mut rooms = self.rooms.lock().await;
        let room = rooms
            .get_mut(room_id)
            .ok_or_else(|| RegistryError::NotFound(room_id.as_str().to_string()))?;
        room.language = language;
        Ok(())
    }

    async fn remove(&self, room_id: &RoomId) {
        let mut rooms = self.rooms.lock().await;
        if rooms.remove(room_id).is_some() {
            tracing::info!("Room '{}' removed", room_id);
        }
    }
}
