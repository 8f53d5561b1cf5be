//! HS256 access tokens whose subject is the user id.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tsudoi_shared::time::unix_timestamp_after_minutes;

use crate::domain::UserId;

/// Access token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string
    pub sub: String,
    /// Expiry (Unix seconds)
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to issue token: {0}")]
    Issue(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token subject is not a user id: '{0}'")]
    InvalidSubject(String),
}

/// Issues and verifies access tokens
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    /// Issue a token for `user_id` expiring after the configured lifetime.
    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        let claims = Claims {
            sub: user_id.to_string(),
            exp: unix_timestamp_after_minutes(self.ttl_minutes),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(TokenError::Issue)
    }

    /// Verify signature and expiry of `token` and return its subject.
    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let validation = Validation::new(Algorithm::HS256);
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(TokenError::Invalid)?;

        data.claims
            .sub
            .parse::<i64>()
            .map(UserId::new)
            .map_err(|_| TokenError::InvalidSubject(data.claims.sub))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_then_verify() {
        // テスト項目: 発行したトークンから同じユーザー ID を取り出せる
        // given (前提条件):
        let service = TokenService::new("test-secret", 30);

        // when (操作):
        let token = service.issue(UserId::new(42)).unwrap();
        let result = service.verify(&token);

        // then (期待する結果):
        assert_eq!(result.unwrap(), UserId::new(42));
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        // テスト項目: 別の鍵で署名されたトークンは検証に失敗する
        let issuer = TokenService::new("secret-a", 30);
        let verifier = TokenService::new("secret-b", 30);
        let token = issuer.issue(UserId::new(1)).unwrap();

        assert!(matches!(
            verifier.verify(&token),
            Err(TokenError::Invalid(_))
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // テスト項目: 有効期限切れのトークンは検証に失敗する
        // given (前提条件): 10 分前に期限切れになるトークン
        let service = TokenService::new("test-secret", -10);
        let token = service.issue(UserId::new(1)).unwrap();

        // when (操作) / then (期待する結果):
        assert!(matches!(service.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        // テスト項目: JWT でない文字列は検証に失敗する
        let service = TokenService::new("test-secret", 30);
        assert!(service.verify("not-a-token").is_err());
    }

    #[test]
    fn test_verify_rejects_non_numeric_subject() {
        // テスト項目: sub が数値でないトークンは InvalidSubject になる
        let service = TokenService::new("test-secret", 30);
        let claims = Claims {
            sub: "alice".to_string(),
            exp: unix_timestamp_after_minutes(30),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        assert!(matches!(
            service.verify(&token),
            Err(TokenError::InvalidSubject(sub)) if sub == "alice"
        ));
    }
}
