//! Data Transfer Objects for the room synchronization server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: realtime event DTOs (internally tagged with `"event"`)
//! - `http`: room lifecycle façade request/response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
