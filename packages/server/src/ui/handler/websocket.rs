//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};

use crate::{
    domain::{RoomId, User},
    infrastructure::dto::websocket::{CLOSE_POLICY_VIOLATION, ConnectQuery},
    ui::{extractor::ApiPath, state::AppState},
    usecase::{AuthenticateUseCase, ConnectParticipantUseCase, LiveSession},
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    ApiPath(room_id): ApiPath<i64>,
    Query(query): Query<ConnectQuery>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state, RoomId::new(room_id), query.token))
}

async fn authenticate(state: &AppState, token: Option<String>) -> Option<User> {
    let token = token?;
    match AuthenticateUseCase::new(state.users.clone(), state.tokens.clone())
        .execute(&token)
        .await
    {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!(error = ?e, "WebSocket token rejected");
            None
        }
    }
}

/// Close the socket with 1008 before it was ever registered in a room.
async fn reject(mut socket: WebSocket, room_id: RoomId, reason: &'static str) {
    tracing::warn!(room = %room_id, reason, "Rejecting WebSocket connection");
    let frame = CloseFrame {
        code: CLOSE_POLICY_VIOLATION,
        reason: reason.into(),
    };
    if let Err(e) = socket.send(Message::Close(Some(frame))).await {
        tracing::debug!(error = %e, "Failed to send close frame");
    }
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>, room_id: RoomId, token: Option<String>) {
    let Some(user) = authenticate(&state, token).await else {
        reject(socket, room_id, "Could not validate credentials").await;
        return;
    };

    let LiveSession {
        membership,
        mut outbound,
    } = match ConnectParticipantUseCase::new(state.rooms.clone(), state.connections.clone())
        .execute(room_id, user.id)
        .await
    {
        Ok(session) => session,
        Err(e) => {
            tracing::debug!(room = %room_id, error = %e, "Cannot join room");
            reject(socket, room_id, "Room not found").await;
            return;
        }
    };

    let (mut sender, mut receiver) = socket.split();
    let connection_id = membership.connection_id();

    // Read loop: every text frame goes verbatim to the whole room.
    // The membership lives in this task, so the connection leaves the room
    // when the loop ends or the task is aborted.
    let mut recv_task = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    let delivered = membership.broadcast(text.as_str());
                    tracing::debug!(
                        room = %membership.room_id(),
                        user = %membership.user_id(),
                        delivered,
                        "Text frame broadcast"
                    );
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(user = %membership.user_id(), "Client requested close");
                    break;
                }
                Ok(Message::Binary(data)) => {
                    tracing::debug!(
                        user = %membership.user_id(),
                        bytes = data.len(),
                        "Ignoring binary frame"
                    );
                }
                // ping/pong are answered by axum
                Ok(Message::Ping(_) | Message::Pong(_)) => {}
                Err(e) => {
                    tracing::warn!(user = %membership.user_id(), error = %e, "WebSocket read error");
                    break;
                }
            }
        }
    });

    // Write loop: room broadcasts to this client
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = outbound.recv().await {
            if sender.send(Message::Text(payload.into())).await.is_err() {
                break;
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    tracing::info!(
        room = %room_id,
        user = %user.id,
        connection = %connection_id,
        "Participant disconnected"
    );
}
