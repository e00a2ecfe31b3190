//! Realtime event DTOs.
//!
//! Every frame on the wire is a JSON object tagged with an `"event"` field,
//! e.g. `{"event":"updatedCode","roomId":"abcd12","code":"...","senderId":"s1"}`.

use serde::{Deserialize, Serialize};

/// Sentinel `senderId` for server-authoritative pushes (join snapshots), so
/// clients can tell them apart from relayed peer edits.
pub const SERVER_SENDER_ID: &str = "server";

/// A chat message as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessageDto {
    pub sender: String,
    pub text: String,
    pub timestamp: i64,
}

/// Events sent by clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ClientEvent {
    #[serde(rename_all = "camelCase")]
    JoinRoom { room_id: String },
    #[serde(rename_all = "camelCase")]
    CreateRoom {
        room_id: String,
        code: String,
        language: String,
    },
    #[serde(rename_all = "camelCase")]
    LanguageChange { room_id: String, language: String },
    #[serde(rename_all = "camelCase")]
    UpdatedCode {
        room_id: String,
        code: String,
        sender_id: String,
    },
    #[serde(rename_all = "camelCase")]
    SendMessage {
        room_id: String,
        sender: String,
        text: String,
    },
}

/// Events sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum ServerEvent {
    #[serde(rename_all = "camelCase")]
    RoomJoined { room_id: String },
    #[serde(rename_all = "camelCase")]
    RoomCreated { room_id: String },
    #[serde(rename_all = "camelCase")]
    UpdatedCode {
        room_id: String,
        code: String,
        sender_id: String,
    },
    #[serde(rename_all = "camelCase")]
    LanguageChange { room_id: String, language: String },
    #[serde(rename_all = "camelCase")]
    ChatHistory { messages: Vec<ChatMessageDto> },
    #[serde(rename_all = "camelCase")]
    ReceiveMessage {
        sender: String,
        text: String,
        timestamp: i64,
    },
    #[serde(rename_all = "camelCase")]
    RoomMembers { count: usize },
    #[serde(rename_all = "camelCase")]
    Error { message: String },
}

impl ServerEvent {
    /// Serialize to the wire representation.
    ///
    /// Serialization of these enums cannot fail; an empty string would only
    /// appear on an internal serde bug and is dropped by receivers.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_join_room_deserializes_from_wire_form() {
        // given:
        let json = r#"{"event":"joinRoom","roomId":"abcd12"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::JoinRoom {
                room_id: "abcd12".to_string()
            }
        );
    }

    #[test]
    fn test_client_event_updated_code_keeps_sender_id() {
        // given:
        let json =
            r#"{"event":"updatedCode","roomId":"abcd12","code":"print(2)","senderId":"s1"}"#;

        // when:
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then:
        assert_eq!(
            event,
            ClientEvent::UpdatedCode {
                room_id: "abcd12".to_string(),
                code: "print(2)".to_string(),
                sender_id: "s1".to_string(),
            }
        );
    }

    #[test]
    fn test_unknown_event_fails_to_deserialize() {
        // given:
        let json = r#"{"event":"selfDestruct","roomId":"abcd12"}"#;

        // when / then:
        assert!(serde_json::from_str::<ClientEvent>(json).is_err());
    }

    #[test]
    fn test_server_event_serializes_with_event_tag() {
        // given:
        let event = ServerEvent::LanguageChange {
            room_id: "abcd12".to_string(),
            language: "python".to_string(),
        };

        // when:
        let json = event.to_json();

        // then:
        assert_eq!(
            json,
            r#"{"event":"languageChange","roomId":"abcd12","language":"python"}"#
        );
    }

    #[test]
    fn test_room_members_event_carries_count() {
        // given:
        let event = ServerEvent::RoomMembers { count: 3 };

        // when / then:
        assert_eq!(event.to_json(), r#"{"event":"roomMembers","count":3}"#);
    }

    #[test]
    fn test_chat_history_event_round_trips() {
        // given:
        let event = ServerEvent::ChatHistory {
            messages: vec![ChatMessageDto {
                sender: "bob".to_string(),
                text: "hi".to_string(),
                timestamp: 42,
            }],
        };

        // when:
        let parsed: ServerEvent = serde_json::from_str(&event.to_json()).unwrap();

        // then:
        assert_eq!(parsed, event);
    }
}
