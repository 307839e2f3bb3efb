//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(i64),

    #[error("Account not found: {0}")]
    AccountNotFound(i64),

    #[error("Tab title cannot be empty")]
    EmptyTitle,

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Reorder list cannot be empty")]
    EmptyOrder,

    #[error("Reorder list must contain each tab of the account exactly once")]
    InvalidOrder,

    #[error("Storage error: {0}")]
    Storage(#[from] streamdock_storage::StorageError),
}

impl From<rusqlite::Error> for TabError {
    fn from(e: rusqlite::Error) -> Self {
        TabError::Storage(e.into())
    }
}
