//! Tab data structure

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Unique identifier
    pub id: i64,
    /// Account this tab belongs to
    pub account_id: i64,
    /// Display title
    pub title: String,
    /// URL opened on launch
    pub url: String,
    /// 1-based position within the account's tab set
    pub position: i32,
}

impl Tab {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            account_id: row.get(1)?,
            title: row.get(2)?,
            url: row.get(3)?,
            position: row.get(4)?,
        })
    }
}
