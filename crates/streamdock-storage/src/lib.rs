//! Streamdock Storage Layer
//!
//! SQLite-based persistence for users, accounts and tabs.
//! Every multi-statement invariant goes through [`Database::transaction`].

mod database;
mod error;
mod migrations;
mod users;

pub use database::Database;
pub use error::{is_unique_violation, StorageError};
pub use users::User;

pub type Result<T> = std::result::Result<T, StorageError>;
