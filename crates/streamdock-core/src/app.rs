//! Central application state
//!
//! [`StreamDock`] owns the database handle and hands clones to every manager;
//! the transport layer talks to this facade only.

use streamdock_accounts::{Account, AccountManager, AccountStatus};
use streamdock_launcher::SessionLauncher;
use streamdock_storage::{Database, User};
use streamdock_tabs::{Tab, TabManager};

use crate::config::Config;
use crate::Result;

pub struct StreamDock {
    config: Config,
    db: Database,
    account_manager: AccountManager,
    tab_manager: TabManager,
    launcher: SessionLauncher,
}

impl StreamDock {
    /// Open (or create) the database and wire up the managers.
    pub fn new(config: Config) -> Result<Self> {
        // Ensure data directory exists
        if let Some(parent) = config.database_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&config.database_path)?;

        tracing::info!(database = %config.database_path.display(), "Streamdock initialized");

        Ok(Self::with_database(config, db))
    }

    /// Wire the managers around an already-open database. Tests use this
    /// with an in-memory database.
    pub fn with_database(config: Config, db: Database) -> Self {
        let account_manager = AccountManager::new(db.clone());
        let tab_manager = TabManager::new(db.clone());
        let launcher = SessionLauncher::new(config.profiles_root.clone());

        Self {
            config,
            db,
            account_manager,
            tab_manager,
            launcher,
        }
    }

    // === Account operations ===

    pub fn list_accounts(&self, user_id: i64) -> Result<Vec<Account>> {
        Ok(self.account_manager.list(user_id)?)
    }

    pub fn get_account(&self, id: i64, user_id: i64) -> Result<Account> {
        Ok(self.account_manager.get(id, user_id)?)
    }

    pub fn create_account(
        &self,
        user_id: i64,
        label: &str,
        email: &str,
        status: AccountStatus,
    ) -> Result<Account> {
        Ok(self.account_manager.create(user_id, label, email, status)?)
    }

    pub fn update_account(
        &self,
        id: i64,
        user_id: i64,
        label: &str,
        email: &str,
        status: AccountStatus,
    ) -> Result<Account> {
        Ok(self
            .account_manager
            .update(id, user_id, label, email, status)?)
    }

    pub fn delete_account(&self, id: i64, user_id: i64) -> Result<()> {
        Ok(self.account_manager.delete(id, user_id)?)
    }

    // === Tab operations ===

    pub fn list_tabs(&self, account_id: i64) -> Result<Vec<Tab>> {
        Ok(self.tab_manager.list_for_account(account_id)?)
    }

    pub fn create_tab(&self, account_id: i64, title: &str, url: &str) -> Result<Tab> {
        Ok(self.tab_manager.create(account_id, title, url)?)
    }

    pub fn update_tab(&self, tab_id: i64, account_id: i64, title: &str, url: &str) -> Result<Tab> {
        Ok(self.tab_manager.update(tab_id, account_id, title, url)?)
    }

    pub fn delete_tab(&self, tab_id: i64, account_id: i64) -> Result<()> {
        Ok(self.tab_manager.delete(tab_id, account_id)?)
    }

    pub fn reorder_tabs(&self, account_id: i64, ordered_ids: &[i64]) -> Result<()> {
        Ok(self.tab_manager.reorder(account_id, ordered_ids)?)
    }

    // === User operations ===

    pub fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        Ok(self.db.create_user(email, password_hash)?)
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.db.user_by_email(email)?)
    }

    // === Session launch ===

    /// Resolve the account and its tabs, then start the browser under the
    /// account's profile directory.
    pub fn open_session(&self, account_id: i64, user_id: i64) -> Result<()> {
        let account = self.account_manager.get(account_id, user_id)?;
        let tabs = self.tab_manager.list_for_account(account_id)?;

        self.launcher.launch(&account, &tabs)?;

        Ok(())
    }

    // === Accessors ===

    pub fn account_manager(&self) -> &AccountManager {
        &self.account_manager
    }

    pub fn tab_manager(&self) -> &TabManager {
        &self.tab_manager
    }

    pub fn launcher(&self) -> &SessionLauncher {
        &self.launcher
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}

impl Clone for StreamDock {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            db: self.db.clone(),
            account_manager: self.account_manager.clone(),
            tab_manager: self.tab_manager.clone(),
            launcher: self.launcher.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CoreError;
    use streamdock_accounts::AccountError;
    use std::path::PathBuf;

    fn test_app() -> StreamDock {
        let config = Config {
            database_path: PathBuf::from(":memory:"),
            profiles_root: PathBuf::from("/tmp/chrome_profiles"),
        };
        StreamDock::with_database(config, Database::open_in_memory().unwrap())
    }

    #[test]
    fn test_account_lifecycle_scenario() {
        let app = test_app();
        let user = app.create_user("owner@example.com", "hash").unwrap();

        let account = app
            .create_account(user.id, "Akun A", "a@gmail.com", AccountStatus::Active)
            .unwrap();
        assert!(account.profile_key.starts_with("profile-akun-a-"));

        let tabs = app.list_tabs(account.id).unwrap();
        assert_eq!(tabs.len(), 5);
        assert_eq!(
            tabs.iter().map(|t| t.position).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );

        // Move the last tab to the front.
        let mut order: Vec<i64> = tabs.iter().map(|t| t.id).collect();
        order.rotate_right(1);
        app.reorder_tabs(account.id, &order).unwrap();

        let reordered = app.list_tabs(account.id).unwrap();
        assert_eq!(reordered.iter().map(|t| t.id).collect::<Vec<_>>(), order);
        assert_eq!(
            reordered.iter().map(|t| t.position).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5]
        );

        app.delete_account(account.id, user.id).unwrap();
        assert!(matches!(
            app.get_account(account.id, user.id),
            Err(CoreError::Account(AccountError::NotFound(_)))
        ));
        assert!(app.list_tabs(account.id).unwrap().is_empty());
    }

    #[test]
    fn test_open_session_is_owner_scoped() {
        let app = test_app();

        let owner = app.create_user("owner@example.com", "hash").unwrap();
        let other = app.create_user("other@example.com", "hash").unwrap();
        let account = app
            .create_account(owner.id, "Mine", "mine@example.com", AccountStatus::Active)
            .unwrap();

        // The foreign user is rejected before any launch is attempted.
        assert!(matches!(
            app.open_session(account.id, other.id),
            Err(CoreError::Account(AccountError::NotFound(_)))
        ));
    }

    #[test]
    fn test_new_creates_the_data_directory() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            database_path: dir.path().join("nested").join("streamdock.db"),
            profiles_root: dir.path().join("chrome_profiles"),
        };

        let app = StreamDock::new(config).unwrap();
        let user = app.create_user("owner@example.com", "hash").unwrap();
        assert!(app.user_by_email("owner@example.com").unwrap().is_some());
        assert_eq!(user.id, 1);
    }
}
