//! UseCase: room creation.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{Room, RoomId, RoomRegistry, Timestamp};

use super::error::CreateRoomError;

/// Creates a room with an initial snapshot, rejecting duplicate ids.
///
/// Both creation paths (realtime `createRoom` event and the HTTP façade) go
/// through this use case, so the duplicate guard is uniform.
pub struct CreateRoomUseCase {
    registry: Arc<dyn RoomRegistry>,
    clock: Arc<dyn Clock>,
}

impl CreateRoomUseCase {
    pub fn new(registry: Arc<dyn RoomRegistry>, clock: Arc<dyn Clock>) -> Self {
        Self { registry, clock }
    }

    /// Insert a new room.
    ///
    /// # Arguments
    ///
    /// * `room_id` - Requested room id
    /// * `owner` - Identity of the creating user, when the creation path has
    ///   one (the realtime path is unauthenticated and passes `None`)
    /// * `code` / `language` - Initial document snapshot
    pub async fn execute(
        &self,
        room_id: RoomId,
        owner: Option<String>,
        code: String,
        language: String,
    ) -> Result<(), CreateRoomError> {
        let room = Room::with_content(
            room_id,
            owner.unwrap_or_default(),
            code,
            language,
            Timestamp::new(self.clock.now_millis()),
        );
        self.registry
            .create(room)
            .await
            .map_err(|_| CreateRoomError::AlreadyExists)
    }
}
