//! Room connection manager.
//!
//! Tracks which live connections belong to which room and which users are
//! present in each room, and fans text payloads out to every connection of a
//! room.
//!
//! A room's state exists only while it has at least one connection: it is
//! created by the first `connect` and dropped together with its last
//! connection. A single mutex guards the whole registry; payloads are sent
//! after the lock has been released.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
};

use parking_lot::Mutex;
use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::domain::{ConnectionId, ConnectionIdFactory, RoomId, UserId};

/// The receiving side of a connection has gone away.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("connection {0} is closed")]
pub struct ConnectionClosed(pub ConnectionId);

/// Handle used to push text payloads to one live connection.
///
/// The socket writer task of the connection drains the paired receiver.
#[derive(Debug, Clone)]
pub struct ConnectionHandle {
    id: ConnectionId,
    sender: UnboundedSender<String>,
}

impl ConnectionHandle {
    pub fn new(id: ConnectionId, sender: UnboundedSender<String>) -> Self {
        Self { id, sender }
    }

    /// Create a handle with a fresh id, together with the receiver its
    /// writer task drains.
    pub fn channel() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(ConnectionIdFactory::generate(), tx), rx)
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Queue `payload` for delivery. Never blocks.
    pub fn send(&self, payload: &str) -> Result<(), ConnectionClosed> {
        self.sender
            .send(payload.to_string())
            .map_err(|_| ConnectionClosed(self.id))
    }
}

#[derive(Debug)]
struct RegisteredConnection {
    /// User that registered the connection
    user_id: UserId,
    handle: ConnectionHandle,
}

/// Per-room state: open connections in registration order and, per present
/// user, how many of those connections they hold.
#[derive(Debug, Default)]
struct RoomState {
    connections: Vec<RegisteredConnection>,
    presence: HashMap<UserId, usize>,
}

impl RoomState {
    fn contains(&self, connection_id: ConnectionId) -> bool {
        self.connections.iter().any(|c| c.handle.id == connection_id)
    }
}

/// Room connection manager
///
/// Built once at startup and shared through `Arc`; every method may be called
/// concurrently from any connection task.
#[derive(Debug, Default)]
pub struct RoomConnectionManager {
    rooms: Mutex<HashMap<RoomId, RoomState>>,
}

impl RoomConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `conn` as live in `room_id` and mark `user_id` present.
    ///
    /// Creates the room state on first use. Registering a connection that is
    /// already registered in the room does nothing.
    pub fn connect(&self, room_id: RoomId, user_id: UserId, conn: ConnectionHandle) {
        let connection_id = conn.id();
        let mut rooms = self.rooms.lock();
        let state = rooms.entry(room_id).or_default();

        if state.contains(connection_id) {
            tracing::debug!(
                room = %room_id,
                connection = %connection_id,
                "Connection already registered, ignoring"
            );
            return;
        }

        state.connections.push(RegisteredConnection {
            user_id,
            handle: conn,
        });
        *state.presence.entry(user_id).or_insert(0) += 1;

        tracing::debug!(
            room = %room_id,
            user = %user_id,
            connection = %connection_id,
            connections = state.connections.len(),
            "Connection registered"
        );
    }

    /// Remove the connection `connection_id` from `room_id`.
    ///
    /// Unknown rooms and connections are a no-op, so calling this twice is
    /// safe. A user stays present until the last of their connections in the
    /// room is removed. The room state is dropped with its last connection.
    pub fn disconnect(&self, room_id: RoomId, user_id: UserId, connection_id: ConnectionId) {
        let mut rooms = self.rooms.lock();
        let Some(state) = rooms.get_mut(&room_id) else {
            return;
        };
        let Some(position) = state
            .connections
            .iter()
            .position(|c| c.handle.id == connection_id)
        else {
            return;
        };

        let removed = state.connections.remove(position);
        if removed.user_id != user_id {
            tracing::warn!(
                room = %room_id,
                connection = %connection_id,
                registered_user = %removed.user_id,
                requested_user = %user_id,
                "Disconnect requested for a different user than the one registered"
            );
        }

        if let Some(count) = state.presence.get_mut(&removed.user_id) {
            *count = count.saturating_sub(1);
            if *count == 0 {
                state.presence.remove(&removed.user_id);
            }
        }

        let remaining = state.connections.len();
        tracing::debug!(
            room = %room_id,
            user = %removed.user_id,
            connection = %connection_id,
            connections = remaining,
            "Connection removed"
        );

        if remaining == 0 {
            rooms.remove(&room_id);
            tracing::debug!(room = %room_id, "Room state released");
        }
    }

    /// Send `payload` to every connection currently registered in `room_id`.
    ///
    /// A connection that fails to accept the payload is logged and skipped.
    /// Returns the number of connections the payload was handed to.
    pub fn broadcast(&self, room_id: RoomId, payload: &str) -> usize {
        let targets: Vec<ConnectionHandle> = {
            let rooms = self.rooms.lock();
            match rooms.get(&room_id) {
                Some(state) => state.connections.iter().map(|c| c.handle.clone()).collect(),
                None => return 0,
            }
        };

        let mut delivered = 0;
        for handle in &targets {
            match handle.send(payload) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(room = %room_id, error = %e, "Failed to deliver broadcast, skipping");
                }
            }
        }

        tracing::trace!(
            room = %room_id,
            delivered,
            targets = targets.len(),
            "Broadcast finished"
        );
        delivered
    }

    /// Snapshot of the users present in `room_id`. Empty for unknown rooms.
    pub fn users_in_room(&self, room_id: RoomId) -> HashSet<UserId> {
        let rooms = self.rooms.lock();
        rooms
            .get(&room_id)
            .map(|state| state.presence.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Number of open connections in `room_id`
    pub fn connection_count(&self, room_id: RoomId) -> usize {
        let rooms = self.rooms.lock();
        rooms
            .get(&room_id)
            .map(|state| state.connections.len())
            .unwrap_or(0)
    }

    /// Number of rooms with at least one open connection
    pub fn active_room_count(&self) -> usize {
        self.rooms.lock().len()
    }

    /// Whether `room_id` currently has state in the registry
    pub fn is_active(&self, room_id: RoomId) -> bool {
        self.rooms.lock().contains_key(&room_id)
    }

    /// Register `conn` and return a guard that disconnects it when dropped.
    pub fn join(
        self: &Arc<Self>,
        room_id: RoomId,
        user_id: UserId,
        conn: ConnectionHandle,
    ) -> RoomMembership {
        let connection_id = conn.id();
        self.connect(room_id, user_id, conn);
        RoomMembership {
            manager: Arc::clone(self),
            room_id,
            user_id,
            connection_id,
        }
    }
}

/// Membership of one live connection in one room.
///
/// Dropping the membership disconnects the connection, whichever way the
/// owning task ends.
#[derive(Debug)]
pub struct RoomMembership {
    manager: Arc<RoomConnectionManager>,
    room_id: RoomId,
    user_id: UserId,
    connection_id: ConnectionId,
}

impl RoomMembership {
    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn connection_id(&self) -> ConnectionId {
        self.connection_id
    }

    /// Broadcast `payload` to the room this membership belongs to
    pub fn broadcast(&self, payload: &str) -> usize {
        self.manager.broadcast(self.room_id, payload)
    }
}

impl Drop for RoomMembership {
    fn drop(&mut self) {
        self.manager
            .disconnect(self.room_id, self.user_id, self.connection_id);
    }
}
