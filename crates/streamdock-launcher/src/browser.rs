//! Browser executable discovery
//!
//! Well-known install locations are checked first, then the PATH. The search
//! order is fixed per platform so repeated launches resolve the same binary.

use std::path::PathBuf;

use crate::{LaunchError, Result};

/// Locate the browser executable, or fail with [`LaunchError::BrowserNotFound`].
pub fn find_browser() -> Result<PathBuf> {
    for candidate in install_candidates() {
        if candidate.is_file() {
            return Ok(candidate);
        }
    }

    for name in PATH_NAMES {
        if let Ok(path) = which::which(name) {
            return Ok(path);
        }
    }

    Err(LaunchError::BrowserNotFound)
}

#[cfg(target_os = "windows")]
const PATH_NAMES: &[&str] = &["chrome.exe", "chrome"];
#[cfg(target_os = "macos")]
const PATH_NAMES: &[&str] = &["google-chrome", "chromium"];
#[cfg(target_os = "linux")]
const PATH_NAMES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];
#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
const PATH_NAMES: &[&str] = &[];

#[cfg(target_os = "windows")]
fn install_candidates() -> Vec<PathBuf> {
    ["ProgramFiles", "ProgramFiles(x86)", "LocalAppData"]
        .iter()
        .filter_map(std::env::var_os)
        .map(|base| {
            PathBuf::from(base)
                .join("Google")
                .join("Chrome")
                .join("Application")
                .join("chrome.exe")
        })
        .collect()
}

#[cfg(target_os = "macos")]
fn install_candidates() -> Vec<PathBuf> {
    vec![
        PathBuf::from("/Applications/Google Chrome.app/Contents/MacOS/Google Chrome"),
        PathBuf::from("/Applications/Chromium.app/Contents/MacOS/Chromium"),
    ]
}

#[cfg(target_os = "linux")]
fn install_candidates() -> Vec<PathBuf> {
    [
        "/usr/bin/google-chrome",
        "/usr/bin/google-chrome-stable",
        "/usr/bin/chromium",
        "/usr/bin/chromium-browser",
        "/opt/google/chrome/chrome",
    ]
    .iter()
    .map(PathBuf::from)
    .collect()
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn install_candidates() -> Vec<PathBuf> {
    Vec::new()
}
