//! Repository traits
//!
//! ドメイン層が定義するデータアクセスの抽象。
//! 具体的な実装は infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[cfg(test)]
use mockall::automock;

use super::{
    Message, MessageText, Room, RoomId, RoomName, User, UserId, Username, error::RepositoryError,
};

/// User store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Register a user. Fails with `DuplicateUsername` when the name is taken.
    async fn create(
        &self,
        username: Username,
        password_hash: String,
    ) -> Result<User, RepositoryError>;

    /// Look a user up by id
    async fn find_by_id(&self, id: UserId) -> Option<User>;

    /// Look a user up by username
    async fn find_by_username(&self, username: &str) -> Option<User>;
}

/// Room store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RoomRepository: Send + Sync {
    async fn create(&self, name: RoomName) -> Result<Room, RepositoryError>;

    /// All rooms ordered by id
    async fn list(&self) -> Vec<Room>;

    async fn find_by_id(&self, id: RoomId) -> Option<Room>;
}

/// Message store
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a message sent by `sender_id` into `room_id`
    async fn create(
        &self,
        text: MessageText,
        sender_id: UserId,
        room_id: RoomId,
        created_at: DateTime<Utc>,
    ) -> Result<Message, RepositoryError>;

    /// Messages of a room in insertion order
    async fn list_by_room(&self, room_id: RoomId) -> Vec<Message>;
}
