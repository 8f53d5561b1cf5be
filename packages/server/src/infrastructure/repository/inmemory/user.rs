//! InMemory User Repository 実装

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{RepositoryError, User, UserId, UserRepository, Username};

#[derive(Debug, Default)]
struct UserTable {
    rows: HashMap<UserId, User>,
    /// username -> id の索引（一意制約）
    by_username: HashMap<String, UserId>,
    last_id: i64,
}

/// インメモリ User Repository 実装
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<UserTable>,
}

impl InMemoryUserRepository {
    /// 新しい InMemoryUserRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        username: Username,
        password_hash: String,
    ) -> Result<User, RepositoryError> {
        let mut table = self.table.lock().await;

        if table.by_username.contains_key(username.as_str()) {
            return Err(RepositoryError::DuplicateUsername(
                username.as_str().to_string(),
            ));
        }

        table.last_id += 1;
        let user = User::new(UserId::new(table.last_id), username, password_hash);
        table
            .by_username
            .insert(user.username.as_str().to_string(), user.id);
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> Option<User> {
        let table = self.table.lock().await;
        table.rows.get(&id).cloned()
    }

    async fn find_by_username(&self, username: &str) -> Option<User> {
        let table = self.table.lock().await;
        table
            .by_username
            .get(username)
            .and_then(|id| table.rows.get(id))
            .cloned()
    }
}
