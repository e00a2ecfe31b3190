//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{
        http::{create_room, generate_link, health_check, room_exists, validate_room_access},
        websocket::websocket_handler,
    },
    signal::shutdown_signal,
    state::AppState,
};

/// Room synchronization server: one WebSocket endpoint for realtime traffic
/// plus the room lifecycle HTTP endpoints.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(app_state);
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    pub fn new(state: AppState) -> Self {
        Self {
            state: Arc::new(state),
        }
    }

    /// Run the server until a shutdown signal arrives.
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app = Router::new()
            // WebSocket endpoint
            .route("/ws", get(websocket_handler))
            // Room lifecycle endpoints
            .route("/room/createRoom", post(create_room))
            .route("/room/generateLink", post(generate_link))
            .route("/room/validateRoomAccess", get(validate_room_access))
            .route("/room/{room_id}", get(room_exists))
            .route("/api/health", get(health_check))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);

        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        tracing::info!(
            "Room synchronization server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}
