//! Room entity and its value objects.

use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Language a freshly created room starts out with, unless the creator
/// supplies one explicitly.
pub const DEFAULT_LANGUAGE: &str = "java";

/// Maximum accepted length of a room identifier, in bytes.
const ROOM_ID_MAX_LEN: usize = 64;

/// Validation errors for [`RoomId`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoomIdError {
    #[error("room id must not be empty")]
    Empty,
    #[error("room id must not exceed {ROOM_ID_MAX_LEN} bytes")]
    TooLong,
}

/// Opaque, globally unique room identifier.
///
/// Room ids may be chosen by clients (short share codes) or generated
/// server-side; the registry only cares that they are non-empty and bounded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, RoomIdError> {
        if value.is_empty() {
            return Err(RoomIdError::Empty);
        }
        if value.len() > ROOM_ID_MAX_LEN {
            return Err(RoomIdError::TooLong);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Factory for server-generated room ids.
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a short random room id (8 hex characters of a v4 UUID).
    pub fn generate() -> RoomId {
        let mut id = Uuid::new_v4().simple().to_string();
        id.truncate(8);
        RoomId(id)
    }
}

/// Unix epoch milliseconds (UTC), always assigned server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// A named collaboration session: one shared code buffer, one language
/// selection, one owner.
///
/// `code` and `language` are full-value snapshots; mutations are total
/// overwrites with last-writer-wins semantics (no diffing, no merge).
#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    /// Identity of the creating user; implicitly granted write access.
    pub owner: String,
    pub code: String,
    pub language: String,
    pub created_at: Timestamp,
}

impl Room {
    /// Create a room with an empty buffer and the default language.
    pub fn new(id: RoomId, owner: String, created_at: Timestamp) -> Self {
        Self::with_content(
            id,
            owner,
            String::new(),
            DEFAULT_LANGUAGE.to_string(),
            created_at,
        )
    }

    /// Create a room with an initial buffer and language.
    pub fn with_content(
        id: RoomId,
        owner: String,
        code: String,
        language: String,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            owner,
            code,
            language,
            created_at,
        }
    }
}
