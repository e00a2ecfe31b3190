//! In-memory repository implementations.
//!
//! Process memory is the only store: a restart loses all rooms and chat
//! history. Durability is out of scope for this deployment model.

mod chat;
mod room;

pub use chat::InMemoryChatHistory;
pub use room::InMemoryRoomRegistry;
