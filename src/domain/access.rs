//! Capability-token payload types.
//!
//! An access token is a signed, self-contained credential binding a room, a
//! user and an access level. The codec that signs and verifies tokens lives in
//! the infrastructure layer; this module only defines the payload.

use serde::{Deserialize, Serialize};

/// Default token lifetime: 12 hours, in milliseconds.
pub const ACCESS_TOKEN_TTL_MS: i64 = 12 * 60 * 60 * 1000;

/// Access level carried by a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Read,
    Write,
}

impl Access {
    /// Parse a client-supplied access level string.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "read" => Some(Self::Read),
            "write" => Some(Self::Write),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

/// Signed token payload: `{roomId, userId, access, expires}`.
///
/// `expires` is an absolute epoch-millisecond deadline. Expiry is checked by
/// the callers that validate tokens, not by the codec itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessClaims {
    pub room_id: String,
    pub user_id: String,
    pub access: Access,
    pub expires: i64,
}

impl AccessClaims {
    /// Build claims expiring [`ACCESS_TOKEN_TTL_MS`] after `now_millis`.
    pub fn with_default_expiry(
        room_id: String,
        user_id: String,
        access: Access,
        now_millis: i64,
    ) -> Self {
        Self {
            room_id,
            user_id,
            access,
            expires: now_millis + ACCESS_TOKEN_TTL_MS,
        }
    }

    /// Whether the claims are expired as of `now_millis`.
    pub fn is_expired(&self, now_millis: i64) -> bool {
        self.expires < now_millis
    }

    /// Effective access level for a room owned by `owner`: the room owner is
    /// always upgraded to write access, overriding the stated level. Rooms
    /// created without an identity (empty owner) upgrade nobody.
    pub fn effective_access(&self, owner: &str) -> Access {
        if !owner.is_empty() && self.user_id == owner {
            Access::Write
        } else {
            self.access
        }
    }
}
