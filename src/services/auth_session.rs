use crate::errors::{AppError, AppResult};
use super::credential_store::CredentialStore;
use super::storage::{Namespace, SharedStore};
use super::task_list::TaskListEngine;

/// Registers and authenticates users and keeps the single active session.
///
/// The session itself lives in the [`TaskListEngine`] passed to each call; this type
/// owns the persisted `currentUser` marker that lets it survive a restart.
pub struct AuthSessionManager {
    credentials: CredentialStore,
    store: SharedStore,
    marker_key: String,
}

impl AuthSessionManager {
    pub fn new(credentials: CredentialStore, store: SharedStore, namespace: &Namespace) -> Self {
        Self { credentials, store, marker_key: namespace.current_user() }
    }

    /// Returns the (trimmed) username the session was opened for.
    pub fn sign_up(
        &self,
        engine: &mut TaskListEngine,
        username: &str,
        password: &str,
        confirm_password: &str,
    ) -> AppResult<String> {
        let username = username.trim();
        if password != confirm_password {
            return Err(AppError::PasswordMismatch);
        }
        self.credentials.register(username, password)?;
        self.establish_session(engine, username)?;
        Ok(username.to_string())
    }

    pub fn sign_in(&self, engine: &mut TaskListEngine, username: &str, password: &str) -> AppResult<String> {
        let username = username.trim();
        if let Err(e) = self.credentials.verify(username, password) {
            tracing::info!("Failed login attempt for user: {}", username);
            return Err(e);
        }
        self.establish_session(engine, username)?;
        Ok(username.to_string())
    }

    // Any previous session is replaced, including its in-memory tasks.
    pub fn establish_session(&self, engine: &mut TaskListEngine, username: &str) -> AppResult<()> {
        engine.open(username)?;
        if let Err(e) = self.store.set(&self.marker_key, username) {
            engine.close();
            return Err(e.into());
        }
        tracing::info!("Session established for user: {}", username);
        Ok(())
    }

    // The marker goes first so a failed removal leaves the session fully intact.
    pub fn log_out(&self, engine: &mut TaskListEngine) -> AppResult<()> {
        self.store.remove(&self.marker_key)?;
        let previous = engine.current_user().map(str::to_string);
        engine.close();
        match previous {
            Some(user) => tracing::info!("User {} logged out", user),
            None => tracing::debug!("Logout without an active session"),
        }
        Ok(())
    }

    /// Re-opens the persisted session, if any. Returns the restored username.
    pub fn restore_session(&self, engine: &mut TaskListEngine) -> AppResult<Option<String>> {
        match self.store.get(&self.marker_key)? {
            Some(username) if !username.is_empty() => {
                self.establish_session(engine, &username)?;
                Ok(Some(username))
            }
            _ => {
                tracing::info!("No persisted session, starting logged out");
                Ok(None)
            }
        }
    }
}
