//! WebSocket connection parameters.
//!
//! Payloads pushed over the socket are plain text frames without an envelope,
//! so there are no message DTOs here.

use serde::Deserialize;

/// Close code sent when the caller is not allowed in (RFC 6455 "policy violation")
pub const CLOSE_POLICY_VIOLATION: u16 = 1008;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    /// Access token issued by `POST /api/login`
    pub token: Option<String>,
}
