//! Streamdock Session Launching
//!
//! Starts a browser window for an account under the account's isolated
//! profile directory, one window argument per saved tab. The spawn is fire
//! and forget: the process is never joined or monitored.

mod browser;
mod error;
mod launcher;

pub use browser::find_browser;
pub use error::LaunchError;
pub use launcher::SessionLauncher;

pub type Result<T> = std::result::Result<T, LaunchError>;
