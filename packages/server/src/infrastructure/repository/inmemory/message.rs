//! InMemory Message Repository 実装

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::{
    Message, MessageId, MessageRepository, MessageText, RepositoryError, RoomId, UserId,
};

#[derive(Debug, Default)]
struct MessageTable {
    /// 挿入順に保持
    rows: Vec<Message>,
    last_id: i64,
}

/// インメモリ Message Repository 実装
///
/// ルームの存在確認は UseCase 層の責務とし、ここでは行わない。
#[derive(Debug, Default)]
pub struct InMemoryMessageRepository {
    table: Mutex<MessageTable>,
}

impl InMemoryMessageRepository {
    /// 新しい InMemoryMessageRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn create(
        &self,
        text: MessageText,
        sender_id: UserId,
        room_id: RoomId,
        created_at: DateTime<Utc>,
    ) -> Result<Message, RepositoryError> {
        let mut table = self.table.lock().await;
        table.last_id += 1;
        let message = Message::new(
            MessageId::new(table.last_id),
            text,
            sender_id,
            room_id,
            created_at,
        );
        table.rows.push(message.clone());
        Ok(message)
    }

    async fn list_by_room(&self, room_id: RoomId) -> Vec<Message> {
        let table = self.table.lock().await;
        table
            .rows
            .iter()
            .filter(|m| m.room_id == room_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> MessageText {
        MessageText::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_list_by_room_filters_and_keeps_order() {
        // テスト項目: ルームごとに挿入順でメッセージを取得できる
        // given (前提条件):
        let repo = InMemoryMessageRepository::new();
        let now = Utc::now();
        repo.create(text("first"), UserId::new(1), RoomId::new(1), now)
            .await
            .unwrap();
        repo.create(text("other room"), UserId::new(1), RoomId::new(2), now)
            .await
            .unwrap();
        repo.create(text("second"), UserId::new(2), RoomId::new(1), now)
            .await
            .unwrap();

        // when (操作):
        let messages = repo.list_by_room(RoomId::new(1)).await;

        // then (期待する結果):
        let texts: Vec<&str> = messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(messages[0].id, MessageId::new(1));
        assert_eq!(messages[1].id, MessageId::new(3));
        assert_eq!(messages[1].sender_id, UserId::new(2));
    }

    #[tokio::test]
    async fn test_list_by_room_empty() {
        // テスト項目: メッセージのないルームは空の一覧
        let repo = InMemoryMessageRepository::new();
        assert!(repo.list_by_room(RoomId::new(1)).await.is_empty());
    }
}
