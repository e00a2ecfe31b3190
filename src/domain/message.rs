//! Chat message entity and its value objects.

use thiserror::Error;

use super::room::Timestamp;

/// Validation errors for [`MessageText`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessageTextError {
    #[error("message text must not be empty")]
    Empty,
}

/// Non-empty chat message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageText(String);

impl MessageText {
    pub fn new(value: String) -> Result<Self, MessageTextError> {
        if value.trim().is_empty() {
            return Err(MessageTextError::Empty);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// A single chat message within a room.
///
/// `timestamp` is assigned by the server when the message is accepted, so
/// ordering never depends on client clocks.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Display name of the sending user.
    pub sender: String,
    pub text: MessageText,
    pub timestamp: Timestamp,
}

impl ChatMessage {
    pub fn new(sender: String, text: MessageText, timestamp: Timestamp) -> Self {
        Self {
            sender,
            text,
            timestamp,
        }
    }
}
