//! Session Launcher

use std::path::{Path, PathBuf};
use std::process::Command;

use streamdock_accounts::Account;
use streamdock_tabs::Tab;

use crate::browser::find_browser;
use crate::{LaunchError, Result};

#[derive(Debug, Clone)]
pub struct SessionLauncher {
    /// Directory holding one profile subdirectory per account
    profiles_root: PathBuf,
}

impl SessionLauncher {
    pub fn new(profiles_root: PathBuf) -> Self {
        Self { profiles_root }
    }

    /// Directory backing `account`'s isolated browser profile.
    ///
    /// The same directory is reused on every launch, so cookies and sessions
    /// survive between runs.
    pub fn profile_dir(&self, account: &Account) -> PathBuf {
        self.profiles_root.join(&account.profile_key)
    }

    /// Start a browser window preloaded with the account's tabs.
    ///
    /// Success means the OS accepted the spawn; the process is neither
    /// joined nor monitored afterwards, and a failed launch leaves nothing
    /// behind except a possibly-empty profile directory.
    pub fn launch(&self, account: &Account, tabs: &[Tab]) -> Result<()> {
        let browser = find_browser()?;

        let profile_dir = self.profile_dir(account);
        ensure_profile_dir(&profile_dir)?;

        Command::new(&browser)
            .args(launch_args(&profile_dir, tabs))
            .spawn()?;

        tracing::info!(
            account_id = account.id,
            profile_key = %account.profile_key,
            browser = %browser.display(),
            tabs = tabs.len(),
            "Launched browser session"
        );

        Ok(())
    }
}

fn ensure_profile_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|source| LaunchError::Profile {
        path: path.to_path_buf(),
        source,
    })
}

/// Argument list for the browser process: isolated user-data directory, the
/// default profile slot, a new window, then one URL per tab in tab order.
fn launch_args(profile_dir: &Path, tabs: &[Tab]) -> Vec<String> {
    let mut args = vec![
        format!("--user-data-dir={}", profile_dir.display()),
        "--profile-directory=Default".to_string(),
        "--new-window".to_string(),
    ];
    args.extend(tabs.iter().map(|tab| tab.url.clone()));
    args
}
