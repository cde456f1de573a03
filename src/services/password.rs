//! Password digests for the credential store.
//!
//! `Legacy` reproduces the 32-bit rolling string hash that existing data was written with.
//! It is NOT a security-grade hash: it is unsalted, fast, and collides easily. Select
//! `Bcrypt` in the auth config for salted hashing; records written by one hasher do not
//! verify under the other.

use crate::config::{AuthConfig, HasherKind};
use crate::errors::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordHasher {
    Legacy,
    Bcrypt { cost: u32 },
}

impl PasswordHasher {
    pub fn from_config(config: &AuthConfig) -> Self {
        match config.hasher {
            HasherKind::Legacy => PasswordHasher::Legacy,
            HasherKind::Bcrypt => PasswordHasher::Bcrypt { cost: config.bcrypt_cost },
        }
    }

    pub fn hash(&self, password: &str) -> AppResult<String> {
        match self {
            PasswordHasher::Legacy => Ok(legacy_hash(password)),
            PasswordHasher::Bcrypt { cost } => Ok(bcrypt::hash(password, *cost)?),
        }
    }

    pub fn verify(&self, password: &str, stored: &str) -> bool {
        match self {
            PasswordHasher::Legacy => legacy_hash(password) == stored,
            PasswordHasher::Bcrypt { .. } => bcrypt::verify(password, stored).unwrap_or_else(|e| {
                tracing::warn!("Stored password hash is not a bcrypt hash: {}", e);
                false
            }),
        }
    }
}

// h = h * 31 + unit over UTF-16 code units, wrapping at 32 bits
fn legacy_hash(password: &str) -> String {
    password
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(i32::from(unit))
        })
        .to_string()
}
