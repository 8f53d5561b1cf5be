//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - ルームの存在確認と RoomConnectionManager への登録
//!
//! ### なぜこのテストが必要か
//! - RoomConnectionManager はルームの実在を検証しないため、ここで弾く必要がある
//! - 返された LiveSession を drop すると切断処理が必ず行われることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存ルームへの接続
//! - 異常系：存在しないルームへの接続
//! - エッジケース：同一ユーザーの複数接続

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;

use crate::{
    domain::{RoomId, RoomRepository, UserId},
    infrastructure::connection::{ConnectionHandle, RoomConnectionManager, RoomMembership},
};

use super::error::ConnectError;

/// 接続中の 1 セッション
///
/// `membership` を drop するとルームから切断される。
/// `outbound` はルームへのブロードキャストを受け取り、ソケットへ書き出す側が読む。
#[derive(Debug)]
pub struct LiveSession {
    pub membership: RoomMembership,
    pub outbound: UnboundedReceiver<String>,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    rooms: Arc<dyn RoomRepository>,
    connections: Arc<RoomConnectionManager>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(rooms: Arc<dyn RoomRepository>, connections: Arc<RoomConnectionManager>) -> Self {
        Self { rooms, connections }
    }

    /// 参加者接続を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 接続先ルーム
    /// * `user_id` - 認証済みユーザー
    ///
    /// # Returns
    ///
    /// * `Ok(LiveSession)` - 接続成功
    /// * `Err(ConnectError)` - 接続失敗
    pub async fn execute(
        &self,
        room_id: RoomId,
        user_id: UserId,
    ) -> Result<LiveSession, ConnectError> {
        // 1. ルームの存在確認
        if self.rooms.find_by_id(room_id).await.is_none() {
            return Err(ConnectError::RoomNotFound);
        }

        // 2. 接続を登録
        let (handle, outbound) = ConnectionHandle::channel();
        let membership = self.connections.join(room_id, user_id, handle);
        tracing::info!(
            room = %room_id,
            user = %user_id,
            connection = %membership.connection_id(),
            "Participant connected"
        );

        Ok(LiveSession {
            membership,
            outbound,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockRoomRepository, Room, RoomName};

    fn rooms_mock() -> Arc<MockRoomRepository> {
        let mut rooms = MockRoomRepository::new();
        rooms.expect_find_by_id().returning(|id| {
            (id == RoomId::new(1))
                .then(|| Room::new(id, RoomName::new("General".to_string()).unwrap()))
        });
        Arc::new(rooms)
    }

    #[tokio::test]
    async fn test_connect_participant_success() {
        // テスト項目: 既存ルームに接続でき、在室ユーザーに反映される
        // given (前提条件):
        let connections = Arc::new(RoomConnectionManager::new());
        let usecase = ConnectParticipantUseCase::new(rooms_mock(), connections.clone());

        // when (操作):
        let mut session = usecase
            .execute(RoomId::new(1), UserId::new(42))
            .await
            .unwrap();

        // then (期待する結果):
        assert!(
            connections
                .users_in_room(RoomId::new(1))
                .contains(&UserId::new(42))
        );
        connections.broadcast(RoomId::new(1), "hi");
        assert_eq!(session.outbound.try_recv().unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_connect_participant_room_not_found() {
        // テスト項目: 存在しないルームへの接続は RoomNotFound で、状態は作られない
        let connections = Arc::new(RoomConnectionManager::new());
        let usecase = ConnectParticipantUseCase::new(rooms_mock(), connections.clone());

        let result = usecase.execute(RoomId::new(2), UserId::new(42)).await;

        assert!(matches!(result, Err(ConnectError::RoomNotFound)));
        assert_eq!(connections.active_room_count(), 0);
    }

    #[tokio::test]
    async fn test_dropping_session_disconnects() {
        // テスト項目: LiveSession を drop するとルームから切断される
        // given (前提条件): 同じユーザーが 2 セッション接続
        let connections = Arc::new(RoomConnectionManager::new());
        let usecase = ConnectParticipantUseCase::new(rooms_mock(), connections.clone());
        let first = usecase
            .execute(RoomId::new(1), UserId::new(42))
            .await
            .unwrap();
        let second = usecase
            .execute(RoomId::new(1), UserId::new(42))
            .await
            .unwrap();
        assert_eq!(connections.connection_count(RoomId::new(1)), 2);

        // when (操作): 1 つ目を閉じる
        drop(first);

        // then (期待する結果): まだ在室
        assert_eq!(connections.connection_count(RoomId::new(1)), 1);
        assert_eq!(connections.users_in_room(RoomId::new(1)).len(), 1);

        // when (操作): 2 つ目も閉じる
        drop(second);

        // then (期待する結果):
        assert!(!connections.is_active(RoomId::new(1)));
    }
}
