//! Domain model for the room synchronization core.
//!
//! Value objects, entities and the trait seams (`RoomRegistry`, `ChatHistory`,
//! `MessagePusher`) that the use case layer depends on. Concrete
//! implementations live in the infrastructure layer (dependency inversion).

mod access;
mod connection;
mod error;
mod message;
mod pusher;
mod registry;
mod room;

pub use access::{ACCESS_TOKEN_TTL_MS, Access, AccessClaims};
pub use connection::ConnectionId;
pub use error::{MessagePushError, RegistryError};
pub use message::{ChatMessage, MessageText, MessageTextError};
#[cfg(test)]
pub use pusher::MockMessagePusher;
pub use pusher::{MessagePusher, PusherChannel};
pub use registry::{ChatHistory, RoomRegistry};
pub use room::{DEFAULT_LANGUAGE, Room, RoomId, RoomIdError, RoomIdFactory, Timestamp};
