//! UseCase: メッセージ送信・一覧取得
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PostMessageUseCase::execute() メソッド
//! - ListMessagesUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - 保存したメッセージが "User {id}: {text}" 形式でルームの接続へ配信されること
//! - 別ルームの接続には届かないこと
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：存在しないルーム、空のメッセージ
//! - エッジケース：誰も接続していないルームへの送信（保存のみ）

use std::sync::Arc;

use tsudoi_shared::time::now_utc;

use crate::{
    domain::{Message, MessageRepository, MessageText, RoomId, RoomRepository, UserId},
    infrastructure::connection::RoomConnectionManager,
};

use super::error::{ListMessagesError, PostMessageError};

/// メッセージ送信のユースケース
pub struct PostMessageUseCase {
    rooms: Arc<dyn RoomRepository>,
    messages: Arc<dyn MessageRepository>,
    connections: Arc<RoomConnectionManager>,
}

impl PostMessageUseCase {
    /// 新しい PostMessageUseCase を作成
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        messages: Arc<dyn MessageRepository>,
        connections: Arc<RoomConnectionManager>,
    ) -> Self {
        Self {
            rooms,
            messages,
            connections,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `sender_id` - 送信者のユーザー ID
    /// * `room_id` - 送信先ルーム
    /// * `text` - メッセージ本文
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 保存されたメッセージ
    /// * `Err(PostMessageError)` - 送信失敗
    pub async fn execute(
        &self,
        sender_id: UserId,
        room_id: RoomId,
        text: String,
    ) -> Result<Message, PostMessageError> {
        let text = MessageText::new(text)?;

        // 1. ルームの存在確認（ConnectionManager はルームの実在を知らない）
        if self.rooms.find_by_id(room_id).await.is_none() {
            return Err(PostMessageError::RoomNotFound);
        }

        // 2. 保存
        let message = self
            .messages
            .create(text, sender_id, room_id, now_utc())
            .await?;

        // 3. ルームの全接続へ配信
        let delivered = self
            .connections
            .broadcast(room_id, &message.broadcast_line());
        tracing::info!(
            room = %room_id,
            sender = %sender_id,
            message = message.id.value(),
            delivered,
            "Message posted"
        );

        Ok(message)
    }
}

/// メッセージ一覧取得のユースケース
pub struct ListMessagesUseCase {
    rooms: Arc<dyn RoomRepository>,
    messages: Arc<dyn MessageRepository>,
}

impl ListMessagesUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>, messages: Arc<dyn MessageRepository>) -> Self {
        Self { rooms, messages }
    }

    /// ルームのメッセージを送信順に取得
    pub async fn execute(&self, room_id: RoomId) -> Result<Vec<Message>, ListMessagesError> {
        if self.rooms.find_by_id(room_id).await.is_none() {
            return Err(ListMessagesError::RoomNotFound);
        }
        Ok(self.messages.list_by_room(room_id).await)
    }
}
