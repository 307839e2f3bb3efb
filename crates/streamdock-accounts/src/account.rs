//! Account data structure and profile-key derivation

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    /// Login is usable and shown in pickers
    #[default]
    Active,
    /// Login kept for reference but not offered for launch
    Inactive,
}

impl AccountStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountStatus::Active => "active",
            AccountStatus::Inactive => "inactive",
        }
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AccountStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(AccountStatus::Active),
            "inactive" => Ok(AccountStatus::Inactive),
            _ => Err(format!("Unknown account status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: i64,
    /// Owning user; every operation is scoped to it
    pub user_id: i64,
    /// Display name
    pub label: String,
    /// Login address of the streaming account
    pub service_email: String,
    /// Whether the login is currently in use
    pub status: AccountStatus,
    /// Name of the isolated browser profile directory; never changes once set
    pub profile_key: String,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub(crate) fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        let status_str: String = row.get(4)?;
        let created_str: String = row.get(6)?;

        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            label: row.get(2)?,
            service_email: row.get(3)?,
            status: status_str.parse().unwrap_or_default(),
            profile_key: row.get(5)?,
            created_at: DateTime::parse_from_rfc3339(&created_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
        })
    }
}

/// Derive a fresh profile key from the display label.
///
/// The slug keeps the directory name readable; the nanosecond suffix keeps
/// repeated labels apart. The UNIQUE constraint on the column catches what
/// the clock does not, and the caller regenerates on that conflict.
pub(crate) fn generate_profile_key(label: &str, email: &str) -> String {
    let mut base = label.trim().to_lowercase().replace(' ', "-");
    if base.is_empty() {
        base = email.split('@').next().unwrap_or_default().to_lowercase();
    }

    let base: String = base
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '-' => c,
            _ => '-',
        })
        .collect();

    let now = Utc::now();
    let nanos = now
        .timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000));

    format!("profile-{base}-{nanos}")
}
