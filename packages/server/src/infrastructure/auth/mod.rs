//! Credential hashing and access token issuance.

pub mod password;
pub mod token;

pub use password::{
    DUMMY_PASSWORD_HASH, PasswordError, hash_password, hash_password_blocking, verify_password,
    verify_password_blocking,
};
pub use token::{Claims, TokenError, TokenService};
