//! Streamdock Tab Management
//!
//! A tab is a saved URL attached to an account, opened as one browser window
//! on session launch. Each account's tab set keeps a dense 1-based position
//! column; every operation that could disturb it runs inside one transaction.

mod defaults;
mod error;
mod manager;
mod tab;

pub use defaults::{insert_default_tabs, DEFAULT_TABS};
pub use error::TabError;
pub use manager::TabManager;
pub use tab::Tab;

pub type Result<T> = std::result::Result<T, TabError>;
