//! WebSocket connection handler.
//!
//! Each connection gets a server-generated id and an unbounded outbound
//! channel. Inbound frames are parsed into [`ClientEvent`]s and dispatched to
//! the use case layer; all outbound traffic flows through the message pusher
//! into the channel drained by [`pusher_loop`].

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessageText, RoomId},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound channel into the
/// WebSocket sink. Exits when the channel closes or the sink errors.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();
    state
        .message_pusher
        .register_connection(connection_id, tx)
        .await;
    tracing::info!("Connection '{}' established", connection_id);

    let (sender, mut receiver) = socket.split();
    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Unparseable frame from '{}': {}", connection_id, e);
                            push_error(
                                &state_clone,
                                connection_id,
                                "Malformed event".to_string(),
                            )
                            .await;
                            continue;
                        }
                    };
                    dispatch(&state_clone, connection_id, event).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping from '{}'", connection_id);
                }
                _ => {}
            }
        }
    });

    // If either direction finishes, tear the other one down.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_usecase.execute(connection_id).await;
}

/// Route a parsed client event to its use case. Failures are answered with an
/// `error` event on the originating connection only.
async fn dispatch(state: &Arc<AppState>, connection_id: ConnectionId, event: ClientEvent) {
    match event {
        ClientEvent::JoinRoom { room_id } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            if let Err(e) = state
                .join_room_usecase
                .execute(room_id, connection_id)
                .await
            {
                push_error(state, connection_id, e.to_string()).await;
            }
        }
        ClientEvent::CreateRoom {
            room_id,
            code,
            language,
        } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            match state
                .create_room_usecase
                .execute(room_id.clone(), None, code, language)
                .await
            {
                Ok(()) => {
                    let ack = ServerEvent::RoomCreated {
                        room_id: room_id.into_string(),
                    };
                    if let Err(e) = state
                        .message_pusher
                        .push_to(&connection_id, &ack.to_json())
                        .await
                    {
                        tracing::warn!("Failed to ack room creation to '{}': {}", connection_id, e);
                    }
                }
                Err(e) => push_error(state, connection_id, e.to_string()).await,
            }
        }
        ClientEvent::UpdatedCode {
            room_id,
            code,
            sender_id,
        } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            if let Err(e) = state
                .update_code_usecase
                .execute(room_id, code, sender_id, connection_id)
                .await
            {
                push_error(state, connection_id, e.to_string()).await;
            }
        }
        ClientEvent::LanguageChange { room_id, language } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            if let Err(e) = state
                .change_language_usecase
                .execute(room_id, language)
                .await
            {
                push_error(state, connection_id, e.to_string()).await;
            }
        }
        ClientEvent::SendMessage {
            room_id,
            sender,
            text,
        } => {
            let Some(room_id) = parse_room_id(connection_id, room_id) else {
                return;
            };
            let text = match MessageText::new(text) {
                Ok(text) => text,
                Err(_) => {
                    // Empty chat messages are dropped silently.
                    tracing::debug!("Dropping empty chat message from '{}'", connection_id);
                    return;
                }
            };
            if let Err(e) = state
                .send_message_usecase
                .execute(room_id, sender, text)
                .await
            {
                push_error(state, connection_id, e.to_string()).await;
            }
        }
    }
}

fn parse_room_id(connection_id: ConnectionId, raw: String) -> Option<RoomId> {
    match RoomId::new(raw) {
        Ok(room_id) => Some(room_id),
        Err(e) => {
            tracing::warn!("Rejected room id from '{}': {}", connection_id, e);
            None
        }
    }
}

async fn push_error(state: &Arc<AppState>, connection_id: ConnectionId, message: String) {
    let event = ServerEvent::Error { message };
    if let Err(e) = state
        .message_pusher
        .push_to(&connection_id, &event.to_json())
        .await
    {
        tracing::warn!("Failed to push error to '{}': {}", connection_id, e);
    }
}
