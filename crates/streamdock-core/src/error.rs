//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] streamdock_storage::StorageError),

    #[error("Account error: {0}")]
    Account(#[from] streamdock_accounts::AccountError),

    #[error("Tab error: {0}")]
    Tab(#[from] streamdock_tabs::TabError),

    #[error("Launch error: {0}")]
    Launch(#[from] streamdock_launcher::LaunchError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::Config(e.to_string())
    }
}
