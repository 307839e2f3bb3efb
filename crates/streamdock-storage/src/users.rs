//! User rows backing the authentication layer.
//!
//! Password hashing and token issuance live outside this workspace; storage
//! only keeps the opaque hash it is handed.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

use crate::database::Database;
use crate::error::is_unique_violation;
use crate::{Result, StorageError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl Database {
    pub fn create_user(&self, email: &str, password_hash: &str) -> Result<User> {
        let created_at = Utc::now();

        let id = self.with_connection(|conn| {
            conn.execute(
                "INSERT INTO users (email, password_hash, created_at) VALUES (?1, ?2, ?3)",
                rusqlite::params![
                    email,
                    password_hash,
                    created_at.to_rfc3339_opts(SecondsFormat::Nanos, true)
                ],
            )
            .map_err(|e| {
                if is_unique_violation(&e, "users.email") {
                    StorageError::Conflict(format!("user email already registered: {email}"))
                } else {
                    StorageError::from(e)
                }
            })?;
            Ok::<_, StorageError>(conn.last_insert_rowid())
        })?;

        tracing::info!(user_id = id, "Created user");

        Ok(User {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at,
        })
    }

    pub fn user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.with_connection(|conn| {
            let user = conn
                .query_row(
                    "SELECT id, email, password_hash, created_at FROM users WHERE email = ?1",
                    [email],
                    |row| {
                        let created_str: String = row.get(3)?;
                        Ok(User {
                            id: row.get(0)?,
                            email: row.get(1)?,
                            password_hash: row.get(2)?,
                            created_at: DateTime::parse_from_rfc3339(&created_str)
                                .map(|dt| dt.with_timezone(&Utc))
                                .unwrap_or_else(|_| Utc::now()),
                        })
                    },
                )
                .optional()?;
            Ok(user)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_and_find_user() {
        let db = Database::open_in_memory().unwrap();

        let user = db.create_user("owner@example.com", "hash").unwrap();
        assert!(user.id > 0);

        let found = db.user_by_email("owner@example.com").unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.password_hash, "hash");

        assert!(db.user_by_email("nobody@example.com").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_is_a_conflict() {
        let db = Database::open_in_memory().unwrap();
        db.create_user("owner@example.com", "hash").unwrap();

        let err = db.create_user("owner@example.com", "other").unwrap_err();
        assert!(matches!(err, StorageError::Conflict(_)));
    }
}
