//! UseCase: ユーザー取得

use std::sync::Arc;

use crate::domain::{User, UserId, UserRepository};

use super::error::GetUserError;

/// ユーザー取得のユースケース
pub struct GetUserUseCase {
    users: Arc<dyn UserRepository>,
}

impl GetUserUseCase {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn execute(&self, user_id: UserId) -> Result<User, GetUserError> {
        self.users
            .find_by_id(user_id)
            .await
            .ok_or(GetUserError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockUserRepository, Username};

    #[tokio::test]
    async fn test_get_user() {
        // テスト項目: 存在するユーザーは取得でき、存在しない場合は NotFound
        // given (前提条件):
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().returning(|id| {
            (id.value() == 1).then(|| {
                User::new(id, Username::new("alice".to_string()).unwrap(), "h".to_string())
            })
        });
        let usecase = GetUserUseCase::new(Arc::new(users));

        // when (操作) / then (期待する結果):
        let alice = usecase.execute(UserId::new(1)).await.unwrap();
        assert_eq!(alice.username.as_str(), "alice");
        assert_eq!(
            usecase.execute(UserId::new(2)).await,
            Err(GetUserError::NotFound)
        );
    }
}
