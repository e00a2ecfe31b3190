//! Use case layer: one struct per transition of the room synchronization
//! state machine, plus the presence tracker.
//!
//! Each use case owns `Arc`s to the trait seams it needs and is wired once at
//! startup (`src/bin/server.rs`). All room-state mutation and fan-out happens
//! here; the UI layer only parses frames and maps errors to wire events.

mod change_language;
mod create_room;
mod disconnect;
mod error;
mod join_room;
mod presence;
mod send_message;
mod update_code;

pub use change_language::ChangeLanguageUseCase;
pub use create_room::CreateRoomUseCase;
pub use disconnect::DisconnectUseCase;
pub use error::{
    ChangeLanguageError, CreateRoomError, JoinRoomError, SendMessageError, UpdateCodeError,
};
pub use join_room::JoinRoomUseCase;
pub use presence::PresenceTracker;
pub use send_message::SendMessageUseCase;
pub use update_code::UpdateCodeUseCase;
