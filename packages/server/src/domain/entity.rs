//! Core domain models for the chat application.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::value_object::{MessageId, MessageText, RoomId, RoomName, UserId, Username};

/// Name of the room created at startup when no room exists yet
pub const DEFAULT_ROOM_NAME: &str = "General";

/// A registered user
///
/// `password_hash` is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// User identifier
    pub id: UserId,
    /// Unique username
    pub username: Username,
    /// Salted password hash
    #[serde(skip)]
    pub password_hash: String,
}

impl User {
    /// Create a new user
    pub fn new(id: UserId, username: Username, password_hash: String) -> Self {
        Self {
            id,
            username,
            password_hash,
        }
    }
}

/// A chat room
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Room {
    /// Room identifier
    pub id: RoomId,
    /// Unique room name
    pub name: RoomName,
}

impl Room {
    /// Create a new room
    pub fn new(id: RoomId, name: RoomName) -> Self {
        Self { id, name }
    }
}

/// A persisted chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub text: MessageText,
    pub sender_id: UserId,
    pub room_id: RoomId,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message
    pub fn new(
        id: MessageId,
        text: MessageText,
        sender_id: UserId,
        room_id: RoomId,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text,
            sender_id,
            room_id,
            created_at,
        }
    }

    /// Plain-text line pushed to live connections for this message.
    ///
    /// Live payloads carry no envelope: the sender is folded into the text.
    pub fn broadcast_line(&self) -> String {
        format!("User {}: {}", self.sender_id, self.text)
    }
}
