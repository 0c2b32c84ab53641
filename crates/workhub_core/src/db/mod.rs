//! Workhub store: connection bootstrap and schema upgrades.
//!
//! # Responsibility
//! - Hand out connections whose `projects`/`tasks` schema is current.
//! - Report which schema step failed when an upgrade cannot be applied.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - Repositories only ever see connections that passed bootstrap.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading the workhub store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// Schema step `version` failed; the upgrade was rolled back.
    MigrationFailed {
        version: u32,
        source: rusqlite::Error,
    },
    /// The store was written by a newer workhub build.
    SchemaTooNew { found: u32, supported: u32 },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "workhub store error: {err}"),
            Self::MigrationFailed { version, source } => {
                write!(f, "workhub schema step {version} failed: {source}")
            }
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "workhub store is at schema {found}, this build only knows up to {supported}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::MigrationFailed { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
