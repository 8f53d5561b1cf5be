//! UseCase: ユーザー登録
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RegisterUserUseCase::execute() メソッド
//! - 入力検証、パスワードのハッシュ化、username の重複チェック
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ユーザーの登録
//! - 異常系：既に使われている username での登録
//! - 異常系：空の username / password

use std::sync::Arc;

use crate::{
    domain::{Password, RepositoryError, User, UserRepository, Username},
    infrastructure::auth::hash_password_blocking,
};

use super::error::RegisterError;

/// ユーザー登録のユースケース
pub struct RegisterUserUseCase {
    users: Arc<dyn UserRepository>,
}

impl RegisterUserUseCase {
    /// 新しい RegisterUserUseCase を作成
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// ユーザー登録を実行
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - 登録されたユーザー
    /// * `Err(RegisterError)` - 入力不正、または username 重複
    pub async fn execute(&self, username: String, password: String) -> Result<User, RegisterError> {
        let username = Username::new(username)?;
        let password = Password::new(password)?;

        let password_hash = hash_password_blocking(password)
            .await
            .map_err(RegisterError::Hashing)?;
        let user = self
            .users
            .create(username, password_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::DuplicateUsername(_) => RegisterError::UsernameTaken,
                other => RegisterError::Repository(other),
            })?;

        tracing::info!(user = %user.id, username = %user.username, "User registered");
        Ok(user)
    }
}
