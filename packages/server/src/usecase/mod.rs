//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_participant;
pub mod error;
pub mod get_user;
pub mod login;
pub mod register_user;
pub mod room_query;
pub mod seed_default_room;
pub mod send_message;

pub use connect_participant::{ConnectParticipantUseCase, LiveSession};
pub use error::{
    AuthError, ConnectError, GetUserError, ListMessagesError, LoginError, PostMessageError,
    RegisterError, RoomQueryError, SeedError,
};
pub use get_user::GetUserUseCase;
pub use login::{AuthenticateUseCase, LoginOutput, LoginUseCase};
pub use register_user::RegisterUserUseCase;
pub use room_query::{RoomQueryUseCase, RoomWithUsers};
pub use seed_default_room::SeedDefaultRoomUseCase;
pub use send_message::{ListMessagesUseCase, PostMessageUseCase};
