//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{
    create_message, get_messages, get_room_detail, get_rooms, get_user, health_check, login,
    logout, register,
};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
