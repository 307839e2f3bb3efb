//! Account Manager
//!
//! CRUD over accounts. Creation seeds the default tab set and deletion
//! removes the account's tabs, each inside one transaction.

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension};

use streamdock_storage::{is_unique_violation, Database};
use streamdock_tabs::insert_default_tabs;

use crate::account::{generate_profile_key, Account, AccountStatus};
use crate::error::AccountError;
use crate::Result;

/// Collisions are nanosecond-rare; a handful of retries is already generous.
const PROFILE_KEY_ATTEMPTS: usize = 3;

const SELECT_ACCOUNT: &str =
    "SELECT id, user_id, label, service_email, status, profile_key, created_at FROM accounts";

pub struct AccountManager {
    db: Database,
}

impl AccountManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Accounts owned by `user_id`, newest first.
    pub fn list(&self, user_id: i64) -> Result<Vec<Account>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(&format!(
                "{SELECT_ACCOUNT} WHERE user_id = ?1 ORDER BY created_at DESC, id DESC"
            ))?;

            let accounts = stmt
                .query_map([user_id], Account::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(accounts)
        })
    }

    pub fn get(&self, id: i64, user_id: i64) -> Result<Account> {
        self.db.with_connection(|conn| {
            conn.query_row(
                &format!("{SELECT_ACCOUNT} WHERE id = ?1 AND user_id = ?2"),
                rusqlite::params![id, user_id],
                Account::from_row,
            )
            .optional()?
            .ok_or(AccountError::NotFound(id))
        })
    }

    /// Create an account together with its default tab set.
    ///
    /// The account row and all five seed tabs commit as one transaction; a
    /// profile-key collision regenerates the key instead of surfacing.
    pub fn create(
        &self,
        user_id: i64,
        label: &str,
        email: &str,
        status: AccountStatus,
    ) -> Result<Account> {
        let label = validated_label(label)?;
        let email = validated_email(email)?;

        self.db.transaction(|conn| {
            let account_id = insert_account_row(conn, user_id, &label, &email, status)?;
            insert_default_tabs(conn, account_id)?;

            tracing::info!(account_id, user_id, "Created account with default tabs");

            conn.query_row(
                &format!("{SELECT_ACCOUNT} WHERE id = ?1"),
                [account_id],
                Account::from_row,
            )
            .map_err(AccountError::from)
        })
    }

    /// Rewrite label, email and status; the profile key never changes.
    pub fn update(
        &self,
        id: i64,
        user_id: i64,
        label: &str,
        email: &str,
        status: AccountStatus,
    ) -> Result<Account> {
        let label = validated_label(label)?;
        let email = validated_email(email)?;

        self.db.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE accounts SET label = ?1, service_email = ?2, status = ?3
                 WHERE id = ?4 AND user_id = ?5",
                rusqlite::params![label, email, status.as_str(), id, user_id],
            )?;
            if changed == 0 {
                return Err(AccountError::NotFound(id));
            }

            conn.query_row(
                &format!("{SELECT_ACCOUNT} WHERE id = ?1"),
                [id],
                Account::from_row,
            )
            .map_err(AccountError::from)
        })
    }

    /// Delete an account and every tab it owns in one transaction.
    ///
    /// Tabs go first and explicitly: the schema cascades, but the operation
    /// must not depend on the backend enforcing FK triggers.
    pub fn delete(&self, id: i64, user_id: i64) -> Result<()> {
        self.db.transaction(|conn| {
            let owned: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM accounts WHERE id = ?1 AND user_id = ?2)",
                rusqlite::params![id, user_id],
                |row| row.get(0),
            )?;
            if !owned {
                return Err(AccountError::NotFound(id));
            }

            conn.execute("DELETE FROM tabs WHERE account_id = ?1", [id])?;
            conn.execute("DELETE FROM accounts WHERE id = ?1", [id])?;

            tracing::info!(account_id = id, user_id, "Deleted account");

            Ok(())
        })
    }
}

impl Clone for AccountManager {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

fn insert_account_row(
    conn: &Connection,
    user_id: i64,
    label: &str,
    email: &str,
    status: AccountStatus,
) -> Result<i64> {
    let created_at = Utc::now().to_rfc3339_opts(SecondsFormat::Nanos, true);

    for _ in 0..PROFILE_KEY_ATTEMPTS {
        let profile_key = generate_profile_key(label, email);

        match conn.execute(
            "INSERT INTO accounts (user_id, label, service_email, status, profile_key, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![user_id, label, email, status.as_str(), profile_key, created_at],
        ) {
            Ok(_) => return Ok(conn.last_insert_rowid()),
            Err(e) if is_unique_violation(&e, "accounts.profile_key") => {
                tracing::warn!(%profile_key, "Profile key collision, regenerating");
                continue;
            }
            Err(e) => return Err(e.into()),
        }
    }

    Err(AccountError::ProfileKeyExhausted)
}

fn validated_label(label: &str) -> Result<String> {
    let label = label.trim();
    if label.is_empty() {
        return Err(AccountError::EmptyLabel);
    }
    Ok(label.to_string())
}

fn validated_email(email: &str) -> Result<String> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AccountError::EmptyEmail);
    }

    let (local, domain) = email.split_once('@').unwrap_or(("", ""));
    if local.is_empty() || domain.is_empty() {
        return Err(AccountError::InvalidEmail(email.to_string()));
    }

    Ok(email.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamdock_tabs::{TabManager, DEFAULT_TABS};

    fn managers() -> (AccountManager, TabManager) {
        let db = Database::open_in_memory().unwrap();
        (AccountManager::new(db.clone()), TabManager::new(db))
    }

    #[test]
    fn test_create_seeds_the_default_tabs() {
        let (accounts, tabs) = managers();

        let account = accounts
            .create(1, "Family", "family@example.com", AccountStatus::Active)
            .unwrap();
        assert_eq!(account.user_id, 1);
        assert_eq!(account.status, AccountStatus::Active);

        let listed = tabs.list_for_account(account.id).unwrap();
        assert_eq!(listed.len(), 5);
        for (index, ((title, url), tab)) in DEFAULT_TABS.iter().zip(&listed).enumerate() {
            assert_eq!(tab.position, index as i32 + 1);
            assert_eq!(tab.title, *title);
            assert_eq!(tab.url, *url);
        }
    }

    #[test]
    fn test_create_trims_and_validates() {
        let (accounts, _) = managers();

        let account = accounts
            .create(1, "  Padded  ", "  padded@example.com ", AccountStatus::Active)
            .unwrap();
        assert_eq!(account.label, "Padded");
        assert_eq!(account.service_email, "padded@example.com");

        assert!(matches!(
            accounts.create(1, "  ", "a@b.c", AccountStatus::Active),
            Err(AccountError::EmptyLabel)
        ));
        assert!(matches!(
            accounts.create(1, "Label", "   ", AccountStatus::Active),
            Err(AccountError::EmptyEmail)
        ));
        assert!(matches!(
            accounts.create(1, "Label", "not-an-email", AccountStatus::Active),
            Err(AccountError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_rapid_creates_get_distinct_profile_keys() {
        let (accounts, _) = managers();

        let first = accounts
            .create(1, "Same Label", "same@example.com", AccountStatus::Active)
            .unwrap();
        let second = accounts
            .create(1, "Same Label", "same@example.com", AccountStatus::Active)
            .unwrap();

        assert_ne!(first.profile_key, second.profile_key);
        assert!(first.profile_key.starts_with("profile-same-label-"));
    }

    #[test]
    fn test_list_is_scoped_and_newest_first() {
        let (accounts, _) = managers();

        let a = accounts
            .create(1, "Oldest", "a@example.com", AccountStatus::Active)
            .unwrap();
        let b = accounts
            .create(1, "Newest", "b@example.com", AccountStatus::Active)
            .unwrap();
        accounts
            .create(2, "Other Tenant", "c@example.com", AccountStatus::Active)
            .unwrap();

        let mine = accounts.list(1).unwrap();
        assert_eq!(mine.iter().map(|acc| acc.id).collect::<Vec<_>>(), vec![b.id, a.id]);

        assert!(accounts.list(3).unwrap().is_empty());
    }

    #[test]
    fn test_get_and_update_are_owner_scoped() {
        let (accounts, _) = managers();

        let account = accounts
            .create(1, "Mine", "mine@example.com", AccountStatus::Active)
            .unwrap();

        assert!(matches!(
            accounts.get(account.id, 2),
            Err(AccountError::NotFound(_))
        ));
        assert!(matches!(
            accounts.update(account.id, 2, "Stolen", "x@y.z", AccountStatus::Active),
            Err(AccountError::NotFound(_))
        ));
    }

    #[test]
    fn test_update_keeps_the_profile_key() {
        let (accounts, _) = managers();

        let account = accounts
            .create(1, "Before", "before@example.com", AccountStatus::Active)
            .unwrap();
        let updated = accounts
            .update(
                account.id,
                1,
                "After",
                "after@example.com",
                AccountStatus::Inactive,
            )
            .unwrap();

        assert_eq!(updated.label, "After");
        assert_eq!(updated.service_email, "after@example.com");
        assert_eq!(updated.status, AccountStatus::Inactive);
        assert_eq!(updated.profile_key, account.profile_key);
        assert_eq!(updated.created_at, account.created_at);
    }

    #[test]
    fn test_delete_removes_the_account_and_its_tabs() {
        let (accounts, tabs) = managers();

        let account = accounts
            .create(1, "Doomed", "doomed@example.com", AccountStatus::Active)
            .unwrap();
        let keeper = accounts
            .create(1, "Keeper", "keeper@example.com", AccountStatus::Active)
            .unwrap();

        accounts.delete(account.id, 1).unwrap();

        assert!(matches!(
            accounts.get(account.id, 1),
            Err(AccountError::NotFound(_))
        ));
        assert!(tabs.list_for_account(account.id).unwrap().is_empty());
        assert_eq!(tabs.list_for_account(keeper.id).unwrap().len(), 5);
    }

    #[test]
    fn test_delete_is_owner_scoped() {
        let (accounts, tabs) = managers();

        let account = accounts
            .create(1, "Mine", "mine@example.com", AccountStatus::Active)
            .unwrap();

        assert!(matches!(
            accounts.delete(account.id, 2),
            Err(AccountError::NotFound(_))
        ));
        assert_eq!(tabs.list_for_account(account.id).unwrap().len(), 5);
    }

    #[test]
    fn test_account_serializes_with_api_field_names() {
        let (accounts, _) = managers();

        let account = accounts
            .create(1, "Wire", "wire@example.com", AccountStatus::Active)
            .unwrap();
        let value = serde_json::to_value(&account).unwrap();

        assert_eq!(value["label"], "Wire");
        assert_eq!(value["service_email"], "wire@example.com");
        assert_eq!(value["status"], "active");
        assert!(value["profile_key"].as_str().unwrap().starts_with("profile-wire-"));
    }
}
