//! Shared application state.

use std::sync::Arc;

use crate::{
    config::ServerConfig,
    domain::{MessageRepository, RoomRepository, UserRepository},
    infrastructure::{
        auth::TokenService,
        connection::RoomConnectionManager,
        repository::{InMemoryMessageRepository, InMemoryRoomRepository, InMemoryUserRepository},
    },
};

/// Shared application state
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub messages: Arc<dyn MessageRepository>,
    /// Live connections per room (one per process)
    pub connections: Arc<RoomConnectionManager>,
    pub tokens: TokenService,
}

impl AppState {
    /// State backed by in-memory repositories
    pub fn in_memory(config: &ServerConfig) -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            rooms: Arc::new(InMemoryRoomRepository::new()),
            messages: Arc::new(InMemoryMessageRepository::new()),
            connections: Arc::new(RoomConnectionManager::new()),
            tokens: TokenService::new(&config.jwt_secret, config.token_ttl_minutes),
        }
    }
}
