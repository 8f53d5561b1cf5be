//! Argon2id password hashing.
//!
//! Hashes are stored as PHC strings (`$argon2id$v=19$m=...,t=...,p=...$salt$hash`),
//! so the parameters travel with each hash. Hashing is CPU heavy; async callers
//! go through [`hash_password_blocking`] and [`verify_password_blocking`].

use argon2::{
    Argon2,
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use rand::RngCore;
use thiserror::Error;

use crate::domain::Password;

const SALT_LENGTH: usize = 16;

/// Well-formed hash with the default Argon2 parameters that matches no password.
///
/// Verified against when a login names an unknown user, so that path pays the
/// same hashing cost as a wrong password.
pub const DUMMY_PASSWORD_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$ZHVtbXktc2FsdC12YWx1ZQ$AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PasswordError {
    #[error("stored password hash is malformed")]
    MalformedHash,

    #[error("password hashing failed: {0}")]
    Hash(#[source] password_hash::Error),

    #[error("password hashing task failed: {0}")]
    Task(String),
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &Password) -> Result<String, PasswordError> {
    let mut salt = [0u8; SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt = SaltString::encode_b64(&salt).map_err(PasswordError::Hash)?;

    let hash = Argon2::default()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map_err(PasswordError::Hash)?;
    Ok(hash.to_string())
}

/// Check `password` against a hash produced by [`hash_password`].
pub fn verify_password(password: &Password, stored: &str) -> Result<bool, PasswordError> {
    let parsed = PasswordHash::new(stored).map_err(|_| PasswordError::MalformedHash)?;
    match Argon2::default().verify_password(password.as_str().as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::Hash(e)),
    }
}

/// [`hash_password`] on the blocking thread pool.
pub async fn hash_password_blocking(password: Password) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
}

/// [`verify_password`] on the blocking thread pool.
pub async fn verify_password_blocking(
    password: Password,
    stored: String,
) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))?
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(s: &str) -> Password {
        Password::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        // テスト項目: ハッシュ化したパスワードを検証できる
        // given (前提条件):
        let stored = hash_password(&password("s3cret")).unwrap();

        // when (操作) / then (期待する結果):
        assert!(stored.starts_with("$argon2id$"));
        assert_eq!(verify_password(&password("s3cret"), &stored), Ok(true));
        assert_eq!(verify_password(&password("wrong"), &stored), Ok(false));
    }

    #[test]
    fn test_hash_uses_random_salt() {
        // テスト項目: 同じパスワードでもソルトが異なるためハッシュは一致しない
        let first = hash_password(&password("same")).unwrap();
        let second = hash_password(&password("same")).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_malformed_hash() {
        // テスト項目: 形式不正なハッシュはエラーになる
        assert_eq!(
            verify_password(&password("x"), "no-separator"),
            Err(PasswordError::MalformedHash)
        );
        assert_eq!(
            verify_password(&password("x"), "salt$digest"),
            Err(PasswordError::MalformedHash)
        );
    }

    #[test]
    fn test_dummy_hash_is_verifiable_and_matches_nothing() {
        // テスト項目: ダミーハッシュは形式として正しく、実際に照合処理が走った上で不一致になる
        // when (操作):
        let result = verify_password(&password("s3cret"), DUMMY_PASSWORD_HASH);

        // then (期待する結果): MalformedHash で早期に返らない
        assert_eq!(result, Ok(false));
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        // テスト項目: ブロッキングスレッドプール経由でもハッシュ化と照合ができる
        let stored = hash_password_blocking(password("s3cret")).await.unwrap();

        assert_eq!(
            verify_password_blocking(password("s3cret"), stored.clone()).await,
            Ok(true)
        );
        assert_eq!(
            verify_password_blocking(password("nope"), stored).await,
            Ok(false)
        );
    }
}
