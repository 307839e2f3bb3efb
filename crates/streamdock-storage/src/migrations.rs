//! Database migrations
//!
//! An ordered, versioned migration list applied at open time. Each step runs
//! at most once (tracked in `schema_version`) and is additionally guarded so
//! that re-applying it against an already-migrated database is harmless.

use rusqlite::Connection;

use crate::Result;

const MIGRATIONS: &[(i32, fn(&Connection) -> Result<()>)] = &[(1, migrate_v1), (2, migrate_v2)];

pub fn run_migrations(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;

    for (version, step) in MIGRATIONS {
        if current_version < *version {
            tracing::info!(version = *version, "Running schema migration");
            step(conn)?;
            set_schema_version(conn, *version)?;
        }
    }

    Ok(())
}

fn get_schema_version(conn: &Connection) -> Result<i32> {
    let result: std::result::Result<i32, _> =
        conn.query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
            row.get(0)
        });

    match result {
        Ok(v) => Ok(v),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
        Err(rusqlite::Error::SqliteFailure(_, _)) => {
            // Table doesn't exist yet
            conn.execute(
                "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL)",
                [],
            )?;
            conn.execute("INSERT INTO schema_version (version) VALUES (0)", [])?;
            Ok(0)
        }
        Err(e) => Err(e.into()),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Initial schema: users, accounts and their tab sets.
///
/// Tab positions carry no UNIQUE constraint: a reorder rewrites positions row
/// by row inside one transaction, which would trip an immediate constraint
/// mid-flight. Position integrity is enforced transactionally instead.
fn migrate_v1(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
    "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS accounts (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            label TEXT NOT NULL,
            service_email TEXT NOT NULL,
            profile_key TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL
        );
    "#,
    )?;

    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS tabs (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            account_id INTEGER NOT NULL,
            title TEXT NOT NULL,
            url TEXT NOT NULL,
            position INTEGER NOT NULL,
            FOREIGN KEY (account_id) REFERENCES accounts(id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_tabs_account ON tabs(account_id);
        CREATE INDEX IF NOT EXISTS idx_tabs_account_position ON tabs(account_id, position);
    "#,
    )?;

    Ok(())
}

/// Tenancy and lifecycle columns on accounts.
///
/// ADD COLUMN fails if the column already exists, so each add is guarded; the
/// DEFAULT clauses backfill pre-existing rows with non-null values.
fn migrate_v2(conn: &Connection) -> Result<()> {
    if !has_column(conn, "accounts", "user_id")? {
        conn.execute(
            "ALTER TABLE accounts ADD COLUMN user_id INTEGER NOT NULL DEFAULT 0",
            [],
        )?;
    }

    if !has_column(conn, "accounts", "status")? {
        conn.execute(
            "ALTER TABLE accounts ADD COLUMN status TEXT NOT NULL DEFAULT 'active'",
            [],
        )?;
    }

    conn.execute_batch("CREATE INDEX IF NOT EXISTS idx_accounts_user ON accounts(user_id);")?;

    Ok(())
}

fn has_column(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
    let mut rows = stmt.query([])?;

    while let Some(row) = rows.next()? {
        let name: String = row.get(1)?;
        if name == column {
            return Ok(true);
        }
    }

    Ok(false)
}
