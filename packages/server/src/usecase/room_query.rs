//! UseCase: ルーム一覧・詳細の取得
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RoomQueryUseCase::list() / get() メソッド
//! - 在室ユーザー（RoomConnectionManager のプレゼンス）がユーザー情報に解決されること
//!
//! ### なぜこのテストが必要か
//! - プレゼンスはユーザー ID しか持たないため、UserRepository との突き合わせが必要
//! - 解決できない ID（削除済みユーザー等）は黙って除外する
//!
//! ### どのような状況を想定しているか
//! - 正常系：在室ユーザーのいるルーム / いないルーム
//! - 異常系：存在しないルーム
//! - エッジケース：UserRepository で解決できないユーザー ID

use std::sync::Arc;

use crate::{
    domain::{Room, RoomId, RoomRepository, User, UserRepository},
    infrastructure::connection::RoomConnectionManager,
};

use super::error::RoomQueryError;

/// 在室ユーザー付きのルーム
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomWithUsers {
    pub room: Room,
    /// ID 昇順
    pub users: Vec<User>,
}

/// ルーム参照のユースケース
pub struct RoomQueryUseCase {
    rooms: Arc<dyn RoomRepository>,
    users: Arc<dyn UserRepository>,
    connections: Arc<RoomConnectionManager>,
}

impl RoomQueryUseCase {
    /// 新しい RoomQueryUseCase を作成
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        users: Arc<dyn UserRepository>,
        connections: Arc<RoomConnectionManager>,
    ) -> Self {
        Self {
            rooms,
            users,
            connections,
        }
    }

    /// 全ルームを在室ユーザー付きで取得
    pub async fn list(&self) -> Vec<RoomWithUsers> {
        let rooms = self.rooms.list().await;
        let mut result = Vec::with_capacity(rooms.len());
        for room in rooms {
            result.push(self.with_users(room).await);
        }
        result
    }

    /// ルームを在室ユーザー付きで取得
    ///
    /// # Returns
    ///
    /// * `Ok(RoomWithUsers)` - ルームと在室ユーザー
    /// * `Err(RoomQueryError::NotFound)` - ルームが存在しない
    pub async fn get(&self, room_id: RoomId) -> Result<RoomWithUsers, RoomQueryError> {
        let room = self
            .rooms
            .find_by_id(room_id)
            .await
            .ok_or(RoomQueryError::NotFound)?;
        Ok(self.with_users(room).await)
    }

    async fn with_users(&self, room: Room) -> RoomWithUsers {
        let mut user_ids: Vec<_> = self.connections.users_in_room(room.id).into_iter().collect();
        user_ids.sort();

        let mut users = Vec::with_capacity(user_ids.len());
        for user_id in user_ids {
            match self.users.find_by_id(user_id).await {
                Some(user) => users.push(user),
                None => tracing::debug!(room = %room.id, user = %user_id, "Present user not found, skipping"),
            }
        }

        RoomWithUsers { room, users }
    }
}
