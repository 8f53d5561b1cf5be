//! Data transfer objects for the HTTP API and the WebSocket endpoint.

pub mod http;
pub mod websocket;
