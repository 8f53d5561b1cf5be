//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{DEFAULT_ROOM_NAME, Message, Room, User};
pub use error::{RepositoryError, ValueObjectError};
pub use factory::ConnectionIdFactory;
pub use repository::{MessageRepository, RoomRepository, UserRepository};
pub use value_object::{
    ConnectionId, MessageId, MessageText, Password, RoomId, RoomName, UserId, Username,
};

#[cfg(test)]
pub use repository::{MockMessageRepository, MockRoomRepository, MockUserRepository};
