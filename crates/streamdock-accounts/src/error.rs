//! Account error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Account not found: {0}")]
    NotFound(i64),

    #[error("Label cannot be empty")]
    EmptyLabel,

    #[error("Service email cannot be empty")]
    EmptyEmail,

    #[error("Invalid service email: {0}")]
    InvalidEmail(String),

    #[error("Could not allocate a unique profile key")]
    ProfileKeyExhausted,

    #[error("Storage error: {0}")]
    Storage(#[from] streamdock_storage::StorageError),
}

impl From<rusqlite::Error> for AccountError {
    fn from(e: rusqlite::Error) -> Self {
        AccountError::Storage(e.into())
    }
}
