//! Server state shared by all handlers.

use std::sync::Arc;

use crate::common::time::Clock;
use crate::domain::{MessagePusher, RoomRegistry};
use crate::infrastructure::token::AccessTokenCodec;
use crate::usecase::{
    ChangeLanguageUseCase, CreateRoomUseCase, DisconnectUseCase, JoinRoomUseCase,
    SendMessageUseCase, UpdateCodeUseCase,
};

/// Shared application state, constructed once at startup and injected into
/// every handler. No module-level singletons: tests build a fresh instance.
pub struct AppState {
    pub create_room_usecase: Arc<CreateRoomUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub update_code_usecase: Arc<UpdateCodeUseCase>,
    pub change_language_usecase: Arc<ChangeLanguageUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub disconnect_usecase: Arc<DisconnectUseCase>,
    /// Transport bookkeeping; the WebSocket handler registers connections
    /// here and pushes request-scoped error events through it.
    pub message_pusher: Arc<dyn MessagePusher>,
    /// Consulted directly by the HTTP façade for existence and ownership.
    pub registry: Arc<dyn RoomRegistry>,
    pub token_codec: Arc<AccessTokenCodec>,
    pub clock: Arc<dyn Clock>,
    /// Public base URL embedded in generated share links.
    pub base_url: String,
}
