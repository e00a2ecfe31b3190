//! Errors shared by the domain trait seams.

use thiserror::Error;

/// Errors returned by [`super::RoomRegistry`] implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("room '{0}' already exists")]
    AlreadyExists(String),
    #[error("room '{0}' does not exist")]
    NotFound(String),
}

/// Errors returned by [`super::MessagePusher`] implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),
    #[error("failed to push message: {0}")]
    PushFailed(String),
}
