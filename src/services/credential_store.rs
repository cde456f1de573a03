use chrono::Utc;
use crate::errors::{AppError, AppResult, StorageError};
use crate::models::{UserCredential, UserMap};
use super::password::PasswordHasher;
use super::storage::{Namespace, SharedStore};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 4;

/// Username -> credential mapping persisted as one JSON object under the `users` key.
pub struct CredentialStore {
    store: SharedStore,
    key: String,
    hasher: PasswordHasher,
}

impl CredentialStore {
    pub fn new(store: SharedStore, namespace: &Namespace, hasher: PasswordHasher) -> Self {
        Self { store, key: namespace.users(), hasher }
    }

    // An unparseable mapping reads as empty instead of failing.
    fn users(&self) -> AppResult<UserMap> {
        let Some(raw) = self.store.get(&self.key)? else {
            return Ok(UserMap::new());
        };
        match serde_json::from_str(&raw) {
            Ok(users) => Ok(users),
            Err(e) => {
                tracing::warn!("Ignoring corrupt user records under {}: {}", self.key, e);
                Ok(UserMap::new())
            }
        }
    }

    fn save_users(&self, users: &UserMap) -> AppResult<()> {
        let raw = serde_json::to_string(users).map_err(StorageError::from)?;
        self.store.set(&self.key, &raw)?;
        Ok(())
    }

    pub fn register(&self, username: &str, password: &str) -> AppResult<()> {
        let mut users = self.users()?;
        if users.contains_key(username) {
            return Err(AppError::DuplicateUsername);
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(AppError::UsernameTooShort(MIN_USERNAME_LEN));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::PasswordTooShort(MIN_PASSWORD_LEN));
        }

        let credential = UserCredential {
            password_hash: self.hasher.hash(password)?,
            created_at: Utc::now().timestamp_millis(),
        };
        users.insert(username.to_string(), credential);
        self.save_users(&users)?;

        tracing::info!("Registered user {}", username);
        Ok(())
    }

    pub fn verify(&self, username: &str, password: &str) -> AppResult<()> {
        let users = self.users()?;
        match users.get(username) {
            Some(credential) if self.hasher.verify(password, &credential.password_hash) => Ok(()),
            Some(_) => {
                tracing::debug!("Password mismatch for user {}", username);
                Err(AppError::InvalidCredentials)
            }
            None => {
                tracing::debug!("Unknown user {}", username);
                Err(AppError::InvalidCredentials)
            }
        }
    }
}
