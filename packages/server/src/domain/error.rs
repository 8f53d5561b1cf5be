//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// Username validation error
    #[error("Username cannot be empty")]
    UsernameEmpty,

    /// Username too long error
    #[error("Username cannot exceed {max} characters (got {actual})")]
    UsernameTooLong { max: usize, actual: usize },

    #[error("Password cannot be empty")]
    PasswordEmpty,

    /// RoomName validation error
    #[error("Room name cannot be empty")]
    RoomNameEmpty,

    #[error("Room name cannot exceed {max} characters (got {actual})")]
    RoomNameTooLong { max: usize, actual: usize },

    /// MessageText validation error
    #[error("Message text cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("Message text cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },
}

/// Errors raised by repository implementations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Username already registered
    #[error("Username '{0}' already exists")]
    DuplicateUsername(String),

    /// Room name already in use
    #[error("Room '{0}' already exists")]
    DuplicateRoomName(String),
}
