//! SQLite-backed storage for the single persisted document slot.
//!
//! # Responsibility
//! - Open and migrate the slot database.
//! - Load/save the dashboard document through a narrow slot seam.
//!
//! # Invariants
//! - Schema version is tracked via `PRAGMA user_version`.
//! - The document lives in exactly one row, keyed by [`slot::STORAGE_KEY`];
//!   writes overwrite it synchronously (last write wins).
//! - A missing or unparsable stored blob degrades to the default document,
//!   never to an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;
mod slot;

pub use open::{open_store, open_store_in_memory};
pub use slot::{load_document, save_document, SqliteStateSlot, StateSlot, STORAGE_KEY};

pub type StoreResult<T> = Result<T, StoreError>;

/// Infrastructure error for slot persistence.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// Document could not be serialized for the slot write.
    Json(serde_json::Error),
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Json(err) => write!(f, "document serialization failed: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "store schema version {db_version} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
