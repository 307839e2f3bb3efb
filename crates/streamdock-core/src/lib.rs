//! Streamdock Core
//!
//! Central coordination layer: configuration, the [`StreamDock`] facade and
//! logging setup. The transport layer (HTTP, CLI, whatever fronts this) is
//! expected to authenticate and parse its inputs before calling in here.

mod app;
mod config;
mod error;

pub use app::StreamDock;
pub use config::Config;
pub use error::CoreError;

// Re-export core components
pub use streamdock_accounts::{Account, AccountError, AccountManager, AccountStatus};
pub use streamdock_launcher::{LaunchError, SessionLauncher};
pub use streamdock_storage::{Database, StorageError, User};
pub use streamdock_tabs::{Tab, TabError, TabManager, DEFAULT_TABS};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
