//! Tsudoi chat server library.
//!
//! Users register, log in for a bearer token, and chat in named rooms.
//! Messages are stored and pushed live to every WebSocket connected to the room.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::{ServerArgs, ServerConfig};
pub use ui::run as run_server;
