//! InMemory Repository 実装
//!
//! プロセス内のコレクションをストレージとして使用します。
//! ID は 1 から始まる連番で採番します。

mod message;
mod room;
mod user;

pub use message::InMemoryMessageRepository;
pub use room::InMemoryRoomRepository;
pub use user::InMemoryUserRepository;
