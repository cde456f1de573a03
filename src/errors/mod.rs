// Error kinds surfaced to callers of the core, plus the storage backend errors beneath them.
use thiserror::Error;

pub mod response;
pub mod storage;

pub use storage::{StorageError, StorageResult};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Username already exists")]
    DuplicateUsername,

    #[error("Username must be at least {0} characters")]
    UsernameTooShort(usize),

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Passwords do not match")]
    PasswordMismatch,

    // Unknown user and wrong password share this variant so callers cannot tell them apart.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Please log in to manage tasks")]
    NotAuthenticated,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),
}

impl AppError {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::DuplicateUsername => "DuplicateUsername",
            AppError::UsernameTooShort(_) => "UsernameTooShort",
            AppError::PasswordTooShort(_) => "PasswordTooShort",
            AppError::PasswordMismatch => "PasswordMismatch",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::NotAuthenticated => "NotAuthenticated",
            AppError::Storage(_) => "Storage",
            AppError::PasswordHash(_) => "PasswordHash",
        }
    }
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
