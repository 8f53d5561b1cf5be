//! UseCase 層のエラー定義

use thiserror::Error;

use crate::{
    domain::{RepositoryError, ValueObjectError},
    infrastructure::auth::{PasswordError, TokenError},
};

/// ユーザー登録のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegisterError {
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error("Username already exists")]
    UsernameTaken,

    #[error(transparent)]
    Hashing(PasswordError),

    #[error(transparent)]
    Repository(RepositoryError),
}

/// ログインのエラー
#[derive(Debug, Error)]
pub enum LoginError {
    /// username が存在しない、またはパスワード不一致
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Hashing(PasswordError),

    #[error(transparent)]
    TokenIssue(#[from] TokenError),
}

/// アクセストークン認証のエラー
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Could not validate credentials")]
    InvalidToken(#[source] TokenError),

    /// トークンは正しいがユーザーが存在しない
    #[error("Could not validate credentials")]
    UnknownUser,
}

/// ルーム取得のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RoomQueryError {
    #[error("Room not found")]
    NotFound,
}

/// メッセージ送信のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PostMessageError {
    #[error(transparent)]
    InvalidInput(#[from] ValueObjectError),

    #[error("Room not found")]
    RoomNotFound,

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// メッセージ一覧取得のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListMessagesError {
    #[error("Room not found")]
    RoomNotFound,
}

/// ユーザー取得のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GetUserError {
    #[error("User not found")]
    NotFound,
}

/// WebSocket 接続のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("Room not found")]
    RoomNotFound,
}

/// 初期ルーム作成のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error(transparent)]
    InvalidName(#[from] ValueObjectError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
