//! Room lifecycle façade request/response DTOs.

use serde::{Deserialize, Serialize};

/// Body of `POST /room/createRoom`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    /// Client-chosen share code; a random id is generated when omitted.
    pub room_id: Option<String>,
    pub user_id: String,
}

/// Response of `POST /room/createRoom`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomResponse {
    pub success: bool,
    pub room_id: String,
    pub token: String,
}

/// Body of `POST /room/generateLink`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLinkRequest {
    pub room_id: String,
    /// `"read"` or `"write"`; validated by the handler so that anything else
    /// is a 400, not a deserialization failure.
    pub access: String,
    pub user_id: String,
}

/// Response of `POST /room/generateLink`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateLinkResponse {
    pub url: String,
    pub token: String,
}

/// Query of `GET /room/validateRoomAccess`.
#[derive(Debug, Deserialize)]
pub struct ValidateAccessQuery {
    pub token: String,
}

/// Response of `GET /room/validateRoomAccess`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateAccessResponse {
    pub room_id: String,
    pub access: String,
}

/// Response of `GET /room/{room_id}` (existence probe).
#[derive(Debug, Serialize)]
pub struct RoomExistsResponse {
    pub exists: bool,
}

/// JSON error body used by all façade failures.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
