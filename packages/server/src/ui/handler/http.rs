//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    domain::{RoomId, UserId},
    infrastructure::dto::http::{
        LoginRequest, LogoutResponseDto, MessageCreateRequest, MessageDto, RegisterRequest,
        RoomDto, TokenResponseDto, UserDto,
    },
    ui::{
        error::ApiError,
        extractor::{ApiJson, ApiPath, CurrentUser},
        state::AppState,
    },
    usecase::{
        GetUserUseCase, ListMessagesUseCase, LoginUseCase, PostMessageUseCase,
        RegisterUserUseCase, RoomQueryUseCase, RoomWithUsers,
    },
};

fn room_dto(view: &RoomWithUsers) -> RoomDto {
    RoomDto {
        id: view.room.id.value(),
        name: view.room.name.as_str().to_string(),
        users: view.users.iter().map(UserDto::from).collect(),
    }
}

fn room_query(state: &AppState) -> RoomQueryUseCase {
    RoomQueryUseCase::new(
        state.rooms.clone(),
        state.users.clone(),
        state.connections.clone(),
    )
}

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Register a new user
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<RegisterRequest>,
) -> Result<Json<UserDto>, ApiError> {
    let user = RegisterUserUseCase::new(state.users.clone())
        .execute(body.username, body.password)
        .await?;
    Ok(Json(UserDto::from(&user)))
}

/// Exchange username/password for an access token
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponseDto>, ApiError> {
    let output = LoginUseCase::new(state.users.clone(), state.tokens.clone())
        .execute(&body.username, body.password)
        .await?;
    Ok(Json(TokenResponseDto {
        access_token: output.access_token,
        token_type: "bearer".to_string(),
        user_id: output.user_id.value(),
    }))
}

/// Tokens are stateless; logging out is up to the client.
pub async fn logout() -> Json<LogoutResponseDto> {
    Json(LogoutResponseDto {
        message: "Logout successful".to_string(),
    })
}

/// Get list of rooms, each with the users currently connected to it
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
) -> Json<Vec<RoomDto>> {
    let rooms = room_query(&state).list().await;
    Json(rooms.iter().map(room_dto).collect())
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    ApiPath(room_id): ApiPath<i64>,
) -> Result<Json<RoomDto>, ApiError> {
    let room = room_query(&state).get(RoomId::new(room_id)).await?;
    Ok(Json(room_dto(&room)))
}

/// Store a message and push it to everyone connected to the room
pub async fn create_message(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    ApiPath(room_id): ApiPath<i64>,
    ApiJson(body): ApiJson<MessageCreateRequest>,
) -> Result<Json<MessageDto>, ApiError> {
    let message = PostMessageUseCase::new(
        state.rooms.clone(),
        state.messages.clone(),
        state.connections.clone(),
    )
    .execute(user.id, RoomId::new(room_id), body.text)
    .await?;
    Ok(Json(MessageDto::from(&message)))
}

/// Message history of a room
pub async fn get_messages(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    ApiPath(room_id): ApiPath<i64>,
) -> Result<Json<Vec<MessageDto>>, ApiError> {
    let messages = ListMessagesUseCase::new(state.rooms.clone(), state.messages.clone())
        .execute(RoomId::new(room_id))
        .await?;
    Ok(Json(messages.iter().map(MessageDto::from).collect()))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<UserDto>, ApiError> {
    let user = GetUserUseCase::new(state.users.clone())
        .execute(UserId::new(user_id))
        .await?;
    Ok(Json(UserDto::from(&user)))
}
