//! Tab Manager
//!
//! CRUD and reordering over a single account's tab list.

use std::collections::HashSet;

use url::Url;

use streamdock_storage::Database;

use crate::error::TabError;
use crate::tab::Tab;
use crate::Result;

pub struct TabManager {
    db: Database,
}

impl TabManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// All tabs of an account, position order.
    pub fn list_for_account(&self, account_id: i64) -> Result<Vec<Tab>> {
        self.db.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, account_id, title, url, position FROM tabs
                 WHERE account_id = ?1 ORDER BY position ASC",
            )?;

            let tabs = stmt
                .query_map([account_id], Tab::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            Ok(tabs)
        })
    }

    /// Append a tab at the next free position.
    ///
    /// The `MAX(position)` read and the insert share one transaction, so two
    /// concurrent creates cannot claim the same slot.
    pub fn create(&self, account_id: i64, title: &str, url: &str) -> Result<Tab> {
        let title = validated_title(title)?;
        let url = validated_url(url)?;

        self.db.transaction(|conn| {
            let account_exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM accounts WHERE id = ?1)",
                [account_id],
                |row| row.get(0),
            )?;
            if !account_exists {
                return Err(TabError::AccountNotFound(account_id));
            }

            let next_position: i32 = conn.query_row(
                "SELECT COALESCE(MAX(position), 0) + 1 FROM tabs WHERE account_id = ?1",
                [account_id],
                |row| row.get(0),
            )?;

            conn.execute(
                "INSERT INTO tabs (account_id, title, url, position) VALUES (?1, ?2, ?3, ?4)",
                rusqlite::params![account_id, title, url, next_position],
            )?;

            let tab = Tab {
                id: conn.last_insert_rowid(),
                account_id,
                title,
                url,
                position: next_position,
            };

            tracing::info!(tab_id = tab.id, account_id, position = tab.position, "Created tab");

            Ok(tab)
        })
    }

    /// Rewrite title and URL; the position is untouched.
    pub fn update(&self, tab_id: i64, account_id: i64, title: &str, url: &str) -> Result<Tab> {
        let title = validated_title(title)?;
        let url = validated_url(url)?;

        self.db.with_connection(|conn| {
            let changed = conn.execute(
                "UPDATE tabs SET title = ?1, url = ?2 WHERE id = ?3 AND account_id = ?4",
                rusqlite::params![title, url, tab_id, account_id],
            )?;
            if changed == 0 {
                return Err(TabError::NotFound(tab_id));
            }

            let tab = conn.query_row(
                "SELECT id, account_id, title, url, position FROM tabs WHERE id = ?1",
                [tab_id],
                Tab::from_row,
            )?;

            Ok(tab)
        })
    }

    /// Delete one tab. Remaining positions keep their values; the next
    /// reorder closes the gap.
    pub fn delete(&self, tab_id: i64, account_id: i64) -> Result<()> {
        self.db.with_connection(|conn| {
            let changed = conn.execute(
                "DELETE FROM tabs WHERE id = ?1 AND account_id = ?2",
                rusqlite::params![tab_id, account_id],
            )?;
            if changed == 0 {
                return Err(TabError::NotFound(tab_id));
            }

            tracing::info!(tab_id, account_id, "Deleted tab");

            Ok(())
        })
    }

    /// Rewrite every position from the given id sequence.
    ///
    /// The sequence must contain each of the account's tab ids exactly once;
    /// duplicates, unknown ids or a partial list abort before any row
    /// changes, so a failed reorder leaves the previous order intact.
    pub fn reorder(&self, account_id: i64, ordered_ids: &[i64]) -> Result<()> {
        if ordered_ids.is_empty() {
            return Err(TabError::EmptyOrder);
        }

        self.db.transaction(|conn| {
            let mut stmt = conn.prepare("SELECT id FROM tabs WHERE account_id = ?1")?;
            let existing = stmt
                .query_map([account_id], |row| row.get::<_, i64>(0))?
                .collect::<rusqlite::Result<HashSet<i64>>>()?;

            let requested: HashSet<i64> = ordered_ids.iter().copied().collect();
            if requested.len() != ordered_ids.len() || requested != existing {
                return Err(TabError::InvalidOrder);
            }

            for (index, tab_id) in ordered_ids.iter().enumerate() {
                conn.execute(
                    "UPDATE tabs SET position = ?1 WHERE id = ?2 AND account_id = ?3",
                    rusqlite::params![index as i64 + 1, tab_id, account_id],
                )?;
            }

            tracing::info!(account_id, tabs = ordered_ids.len(), "Reordered tabs");

            Ok(())
        })
    }
}

impl Clone for TabManager {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
        }
    }
}

fn validated_title(title: &str) -> Result<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TabError::EmptyTitle);
    }
    Ok(title.to_string())
}

fn validated_url(url: &str) -> Result<String> {
    let url = url.trim();
    if url.is_empty() || Url::parse(url).is_err() {
        return Err(TabError::InvalidUrl(url.to_string()));
    }
    Ok(url.to_string())
}
