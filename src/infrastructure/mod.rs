//! Infrastructure layer: concrete implementations of the domain trait seams
//! plus wire DTOs and the access-token codec.

pub mod dto;
pub mod message_pusher;
pub mod repository;
pub mod token;
