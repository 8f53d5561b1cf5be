//! Live connection tracking and room broadcast.

pub mod manager;

pub use manager::{ConnectionClosed, ConnectionHandle, RoomConnectionManager, RoomMembership};
