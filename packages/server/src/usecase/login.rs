//! UseCase: ログインとアクセストークン認証
//!
//! - LoginUseCase: username / password を検証してアクセストークンを発行
//! - AuthenticateUseCase: アクセストークンからユーザーを解決

use std::sync::Arc;

use crate::{
    domain::{Password, User, UserId, UserRepository},
    infrastructure::auth::{
        DUMMY_PASSWORD_HASH, PasswordError, TokenService, verify_password_blocking,
    },
};

use super::error::{AuthError, LoginError};

/// ログイン成功時の出力
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub access_token: String,
    pub user_id: UserId,
}

/// ログインのユースケース
pub struct LoginUseCase {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl LoginUseCase {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// ログインを実行
    ///
    /// username が存在しない場合とパスワード不一致の場合は区別しない。
    /// 存在しない username でもダミーハッシュと照合し、応答時間を揃える。
    pub async fn execute(&self, username: &str, password: String) -> Result<LoginOutput, LoginError> {
        let password = Password::new(password).map_err(|_| LoginError::InvalidCredentials)?;
        let user = self.users.find_by_username(username).await;

        let stored = user
            .as_ref()
            .map_or(DUMMY_PASSWORD_HASH, |u| u.password_hash.as_str())
            .to_string();
        let verified = verify_password_blocking(password, stored).await;

        let Some(user) = user else {
            return Err(LoginError::InvalidCredentials);
        };
        match verified {
            Ok(true) => {}
            Ok(false) => return Err(LoginError::InvalidCredentials),
            Err(PasswordError::MalformedHash) => {
                tracing::error!(user = %user.id, "Stored password hash is unreadable");
                return Err(LoginError::InvalidCredentials);
            }
            Err(e) => return Err(LoginError::Hashing(e)),
        }

        let access_token = self.tokens.issue(user.id)?;
        tracing::info!(user = %user.id, "User logged in");

        Ok(LoginOutput {
            access_token,
            user_id: user.id,
        })
    }
}

/// アクセストークン認証のユースケース
pub struct AuthenticateUseCase {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl AuthenticateUseCase {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// トークンを検証し、subject のユーザーを返す
    pub async fn execute(&self, token: &str) -> Result<User, AuthError> {
        let user_id = self.tokens.verify(token).map_err(AuthError::InvalidToken)?;
        self.users
            .find_by_id(user_id)
            .await
            .ok_or(AuthError::UnknownUser)
    }
}
