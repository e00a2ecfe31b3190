//! Room synchronization server for a collaborative code editor.
//!
//! Serves the realtime WebSocket protocol (shared code buffer, chat,
//! presence) and the room lifecycle HTTP endpoints.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin server
//! cargo run --bin server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;
use codescribe_server::{
    common::{logger::setup_logger, time::SystemClock},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryChatHistory, InMemoryRoomRegistry},
        token::AccessTokenCodec,
    },
    ui::{Server, state::AppState},
    usecase::{
        ChangeLanguageUseCase, CreateRoomUseCase, DisconnectUseCase, JoinRoomUseCase,
        PresenceTracker, SendMessageUseCase, UpdateCodeUseCase,
    },
};

/// Fallback signing secret for local development only.
const DEV_TOKEN_SECRET: &str = "codescribe_dev_secret";

#[derive(Parser, Debug)]
#[command(name = "server")]
#[command(about = "Realtime room synchronization server", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Public base URL embedded in generated share links
    #[arg(long, default_value = "http://localhost:8080")]
    base_url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let token_secret = std::env::var("ACCESS_TOKEN_SECRET").unwrap_or_else(|_| {
        tracing::warn!("ACCESS_TOKEN_SECRET not set, using the development secret");
        DEV_TOKEN_SECRET.to_string()
    });

    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. UseCases
    // 4. AppState
    // 5. Server

    // 1. Create repositories (in-memory)
    let registry = Arc::new(InMemoryRoomRegistry::new());
    let chat_history = Arc::new(InMemoryChatHistory::new());

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let clock = Arc::new(SystemClock);
    let presence = Arc::new(PresenceTracker::new(message_pusher.clone()));
    let create_room_usecase = Arc::new(CreateRoomUseCase::new(registry.clone(), clock.clone()));
    let join_room_usecase = Arc::new(JoinRoomUseCase::new(
        registry.clone(),
        chat_history.clone(),
        message_pusher.clone(),
        presence.clone(),
    ));
    let update_code_usecase = Arc::new(UpdateCodeUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let change_language_usecase = Arc::new(ChangeLanguageUseCase::new(
        registry.clone(),
        message_pusher.clone(),
    ));
    let send_message_usecase = Arc::new(SendMessageUseCase::new(
        registry.clone(),
        chat_history.clone(),
        message_pusher.clone(),
        clock.clone(),
    ));
    let disconnect_usecase = Arc::new(DisconnectUseCase::new(
        registry.clone(),
        chat_history.clone(),
        message_pusher.clone(),
        presence,
    ));

    // 4. Assemble the application state
    let state = AppState {
        create_room_usecase,
        join_room_usecase,
        update_code_usecase,
        change_language_usecase,
        send_message_usecase,
        disconnect_usecase,
        message_pusher,
        registry,
        token_codec: Arc::new(AccessTokenCodec::new(token_secret)),
        clock,
        base_url: args.base_url,
    };

    // 5. Create and run the server
    let server = Server::new(state);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
