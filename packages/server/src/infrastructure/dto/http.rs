//! HTTP API request/response DTOs for the chat application.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Message, User};

/// Body of `POST /api/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /api/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponseDto {
    pub access_token: String,
    pub token_type: String, // always "bearer"
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponseDto {
    pub message: String,
}

/// Public user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i64,
    pub username: String,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.value(),
            username: user.username.as_str().to_string(),
        }
    }
}

/// Room with the users currently present in it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomDto {
    pub id: i64,
    pub name: String,
    pub users: Vec<UserDto>,
}

/// Body of `POST /api/chat/rooms/{room_id}/messages`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreateRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: i64,
    pub text: String,
    pub sender_id: i64,
    pub room_id: i64,
    pub created_at: DateTime<Utc>, // RFC 3339
}

impl From<&Message> for MessageDto {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.value(),
            text: message.text.as_str().to_string(),
            sender_id: message.sender_id.value(),
            room_id: message.room_id.value(),
            created_at: message.created_at,
        }
    }
}

/// Error body returned with every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponseDto {
    pub detail: String,
}
