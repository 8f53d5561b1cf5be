//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! BTreeMap をインメモリ DB として使用します（ID 順の一覧をそのまま返せるため）。

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, Room, RoomId, RoomName, RoomRepository};

#[derive(Debug, Default)]
struct RoomTable {
    rows: BTreeMap<RoomId, Room>,
    last_id: i64,
}

/// インメモリ Room Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryRoomRepository {
    table: Mutex<RoomTable>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn create(&self, name: RoomName) -> Result<Room, RepositoryError> {
        let mut table = self.table.lock().await;

        // 名前の重複チェック
        if table.rows.values().any(|r| r.name == name) {
            return Err(RepositoryError::DuplicateRoomName(name.as_str().to_string()));
        }

        table.last_id += 1;
        let room = Room::new(RoomId::new(table.last_id), name);
        table.rows.insert(room.id, room.clone());
        Ok(room)
    }

    async fn list(&self) -> Vec<Room> {
        let table = self.table.lock().await;
        table.rows.values().cloned().collect()
    }

    async fn find_by_id(&self, id: RoomId) -> Option<Room> {
        let table = self.table.lock().await;
        table.rows.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - ルームの作成・一覧・ID 検索
    // - 連番採番と名前の一意性
    // ========================================

    fn name(s: &str) -> RoomName {
        RoomName::new(s.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        // テスト項目: 作成したルームに 1 からの連番 ID が振られる
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();

        // when (操作):
        let general = repo.create(name("General")).await.unwrap();
        let random = repo.create(name("Random")).await.unwrap();

        // then (期待する結果):
        assert_eq!(general.id, RoomId::new(1));
        assert_eq!(random.id, RoomId::new(2));
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        // テスト項目: 同名のルームは作成できない
        // given (前提条件):
        let repo = InMemoryRoomRepository::new();
        repo.create(name("General")).await.unwrap();

        // when (操作):
        let result = repo.create(name("General")).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RepositoryError::DuplicateRoomName("General".to_string()))
        );
        assert_eq!(repo.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_list_and_find() {
        // テスト項目: 一覧は ID 順、存在しない ID は None
        let repo = InMemoryRoomRepository::new();
        repo.create(name("b")).await.unwrap();
        repo.create(name("a")).await.unwrap();

        let rooms = repo.list().await;
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].name.as_str(), "b");
        assert_eq!(rooms[1].name.as_str(), "a");

        assert_eq!(
            repo.find_by_id(RoomId::new(2)).await.map(|r| r.name),
            Some(name("a"))
        );
        assert!(repo.find_by_id(RoomId::new(3)).await.is_none());
    }
}
