//! Default tab seed set
//!
//! Every new account starts from the same five tabs, inserted in the same
//! transaction as the account row so an account is never observable without
//! them.

use rusqlite::Connection;

/// Seed tabs for a new account, in position order.
pub const DEFAULT_TABS: [(&str, &str); 5] = [
    ("Netflix Account", "https://www.netflix.com/account"),
    ("Netflix Password", "https://www.netflix.com/password"),
    ("Netflix Login Help", "https://www.netflix.com/id/loginhelp"),
    ("Gmail", "https://mail.google.com/"),
    ("Netflix TV", "https://www.netflix.com/tv2"),
];

/// Insert the default tab set for `account_id` on the caller's open
/// transaction. Account creation is the only caller; this never runs
/// standalone.
pub fn insert_default_tabs(conn: &Connection, account_id: i64) -> rusqlite::Result<()> {
    for (index, (title, url)) in DEFAULT_TABS.iter().enumerate() {
        conn.execute(
            "INSERT INTO tabs (account_id, title, url, position) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![account_id, title, url, index as i64 + 1],
        )?;
    }

    Ok(())
}
