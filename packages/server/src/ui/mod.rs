//! HTTP / WebSocket layer of the chat server.

mod error;
mod extractor;
mod handler;
mod runner;
mod signal;
pub mod state;

pub use error::ApiError;
pub use extractor::CurrentUser;
pub use runner::{ServerError, build_router, run, serve};
