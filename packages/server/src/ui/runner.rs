//! Router construction and server startup.

use std::{future::Future, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::{
    config::ServerConfig,
    usecase::{SeedDefaultRoomUseCase, SeedError},
};

use super::{handler, signal::shutdown_signal, state::AppState};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to seed default room: {0}")]
    Seed(#[from] SeedError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handler::health_check))
        .route("/api/register", post(handler::register))
        .route("/api/login", post(handler::login))
        .route("/api/logout", post(handler::logout))
        .route("/api/chat/rooms", get(handler::get_rooms))
        .route("/api/chat/rooms/{room_id}", get(handler::get_room_detail))
        .route(
            "/api/chat/rooms/{room_id}/messages",
            get(handler::get_messages).post(handler::create_message),
        )
        .route("/api/users/{user_id}", get(handler::get_user))
        .route("/ws/{room_id}", get(handler::websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured address and serve until Ctrl-C / SIGTERM.
pub async fn run(config: ServerConfig) -> Result<(), ServerError> {
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    serve(listener, config, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, config: ServerConfig, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    if config.uses_development_secret() {
        tracing::warn!("No JWT secret configured, using the development secret");
    }

    let state = Arc::new(AppState::in_memory(&config));
    SeedDefaultRoomUseCase::new(state.rooms.clone())
        .execute()
        .await?;

    let app = build_router(state);

    match listener.local_addr() {
        Ok(addr) => {
            tracing::info!("Listening on http://{}", addr);
            tracing::info!("WebSocket endpoint: ws://{}/ws/{{room_id}}?token=...", addr);
        }
        Err(e) => tracing::warn!("Could not read local address: {}", e),
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)
}
