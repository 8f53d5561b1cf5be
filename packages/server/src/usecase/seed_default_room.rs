//! UseCase: 起動時の初期ルーム作成
//!
//! ルームが 1 つも存在しない場合に限り "General" を作成します。

use std::sync::Arc;

use crate::domain::{DEFAULT_ROOM_NAME, Room, RoomName, RoomRepository};

use super::error::SeedError;

pub struct SeedDefaultRoomUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl SeedDefaultRoomUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// # Returns
    ///
    /// * `Ok(Some(Room))` - 初期ルームを作成した
    /// * `Ok(None)` - 既にルームが存在するため何もしなかった
    pub async fn execute(&self) -> Result<Option<Room>, SeedError> {
        if !self.rooms.list().await.is_empty() {
            return Ok(None);
        }

        let name = RoomName::new(DEFAULT_ROOM_NAME.to_string())?;
        let room = self.rooms.create(name).await?;
        tracing::info!(room = %room.id, name = %room.name, "Default room created");
        Ok(Some(room))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::InMemoryRoomRepository;

    #[tokio::test]
    async fn test_seed_creates_general_once() {
        // テスト項目: 初回のみ "General" が作成され、2 回目は何もしない
        // given (前提条件):
        let rooms = Arc::new(InMemoryRoomRepository::new());
        let usecase = SeedDefaultRoomUseCase::new(rooms.clone());

        // when (操作):
        let first = usecase.execute().await.unwrap();
        let second = usecase.execute().await.unwrap();

        // then (期待する結果):
        assert_eq!(
            first.map(|r| r.name.as_str().to_string()),
            Some("General".to_string())
        );
        assert!(second.is_none());
        assert_eq!(rooms.list().await.len(), 1);
    }
}
