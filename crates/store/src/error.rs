use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access score store {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("score store {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode score store: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("password must not be empty")]
    EmptyPassword,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("username {0:?} already exists")]
    UsernameTaken(String),
    #[error("invalid username or password")]
    InvalidCredentials,
}

impl StoreError {
    /// True for rejected account input, as opposed to storage failures.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            StoreError::EmptyUsername
                | StoreError::EmptyPassword
                | StoreError::PasswordMismatch
                | StoreError::UsernameTaken(_)
                | StoreError::InvalidCredentials
        )
    }
}
