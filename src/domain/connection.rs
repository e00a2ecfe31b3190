//! Transport connection identity.

use uuid::Uuid;

/// Server-generated identifier of a single transport connection.
///
/// Echo suppression for code edits is keyed on this id, never on the
/// client-supplied `senderId` field, which a buggy or malicious client could
/// forge. The `senderId` is only relayed for client-side deduplication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    /// Generate a fresh connection id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
