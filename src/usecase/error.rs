//! Use case error types.
//!
//! Every error here is scoped to the requesting connection; nothing escalates
//! past the handler that detected it, and nothing is ever broadcast to the
//! whole room.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CreateRoomError {
    #[error("Room already exists")]
    AlreadyExists,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinRoomError {
    #[error("Room does not exist")]
    RoomNotFound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UpdateCodeError {
    #[error("Room does not exist")]
    RoomNotFound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ChangeLanguageError {
    #[error("Room does not exist")]
    RoomNotFound,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("Room does not exist")]
    RoomNotFound,
}
