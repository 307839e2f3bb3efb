//! Streamdock Account Management
//!
//! An account is one streaming-service login bound to one isolated browser
//! profile. Creation seeds the default tab set in the same transaction, so
//! accounts and their tabs never exist half-made.

mod account;
mod error;
mod manager;

pub use account::{Account, AccountStatus};
pub use error::AccountError;
pub use manager::AccountManager;

pub type Result<T> = std::result::Result<T, AccountError>;
