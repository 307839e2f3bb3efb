//! Launch error types

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("No supported browser executable found; install Google Chrome or put it on the PATH")]
    BrowserNotFound,

    #[error("Could not create profile directory {}: {source}", .path.display())]
    Profile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Browser process failed to start: {0}")]
    Spawn(#[from] std::io::Error),
}
