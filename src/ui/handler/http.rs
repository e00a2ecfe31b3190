//! Room lifecycle HTTP endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use crate::{
    domain::{Access, AccessClaims, DEFAULT_LANGUAGE, RoomId, RoomIdFactory},
    infrastructure::dto::http::{
        CreateRoomRequest, CreateRoomResponse, ErrorResponse, GenerateLinkRequest,
        GenerateLinkResponse, RoomExistsResponse, ValidateAccessQuery, ValidateAccessResponse,
    },
    ui::state::AppState,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `POST /room/createRoom`: create a room owned by the caller and mint a
/// write-level access token for them.
pub async fn create_room(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<Json<CreateRoomResponse>, ApiError> {
    if req.user_id.is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Missing userId"));
    }

    let room_id = match req.room_id {
        Some(requested) => RoomId::new(requested)
            .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Invalid roomId"))?,
        None => RoomIdFactory::generate(),
    };

    state
        .create_room_usecase
        .execute(
            room_id.clone(),
            Some(req.user_id.clone()),
            String::new(),
            DEFAULT_LANGUAGE.to_string(),
        )
        .await
        .map_err(|e| api_error(StatusCode::CONFLICT, &e.to_string()))?;

    let claims = AccessClaims::with_default_expiry(
        room_id.as_str().to_string(),
        req.user_id,
        Access::Write,
        state.clock.now_millis(),
    );
    let token = state.token_codec.encode(&claims);

    tracing::info!("Room '{}' created via HTTP", room_id);
    Ok(Json(CreateRoomResponse {
        success: true,
        room_id: room_id.into_string(),
        token,
    }))
}

/// `POST /room/generateLink`: mint a share link (and its token) for an
/// existing room. The room owner is always issued write access, regardless of
/// the requested level.
pub async fn generate_link(
    State(state): State<Arc<AppState>>,
    Json(req): Json<GenerateLinkRequest>,
) -> Result<Json<GenerateLinkResponse>, ApiError> {
    let room_id = RoomId::new(req.room_id)
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Missing roomId or access"))?;
    let access = Access::parse(&req.access)
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Invalid access level"))?;

    let room = state
        .registry
        .get(&room_id)
        .await
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Room does not exist"))?;

    let granted = if !room.owner.is_empty() && req.user_id == room.owner {
        Access::Write
    } else {
        access
    };

    let claims = AccessClaims::with_default_expiry(
        room_id.as_str().to_string(),
        req.user_id,
        granted,
        state.clock.now_millis(),
    );
    let token = state.token_codec.encode(&claims);
    let url = format!(
        "{}/room/{}?token={}",
        state.base_url.trim_end_matches('/'),
        room_id,
        token
    );

    Ok(Json(GenerateLinkResponse { url, token }))
}

/// `GET /room/validateRoomAccess?token=...`: verify a token and report the
/// effective access level for its room.
pub async fn validate_room_access(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ValidateAccessQuery>,
) -> Result<Json<ValidateAccessResponse>, ApiError> {
    let claims = state
        .token_codec
        .decode(&query.token)
        .ok_or_else(|| api_error(StatusCode::UNAUTHORIZED, "Invalid token"))?;

    if claims.is_expired(state.clock.now_millis()) {
        return Err(api_error(StatusCode::UNAUTHORIZED, "Token expired"));
    }

    // A token can outlive its room in this ephemeral deployment model.
    let room_id = RoomId::new(claims.room_id.clone())
        .map_err(|_| api_error(StatusCode::NOT_FOUND, "Room does not exist"))?;
    let room = state
        .registry
        .get(&room_id)
        .await
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, "Room does not exist"))?;

    let access = claims.effective_access(&room.owner);
    Ok(Json(ValidateAccessResponse {
        room_id: claims.room_id,
        access: access.as_str().to_string(),
    }))
}

/// `GET /room/{room_id}`: existence probe used by the join screen.
pub async fn room_exists(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Json<RoomExistsResponse> {
    let exists = match RoomId::new(room_id) {
        Ok(room_id) => state.registry.exists(&room_id).await,
        // Anything that cannot be a room id does not name a room.
        Err(_) => false,
    };
    Json(RoomExistsResponse { exists })
}
