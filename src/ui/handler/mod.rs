//! HTTP and WebSocket request handlers.

pub mod http;
pub mod websocket;
