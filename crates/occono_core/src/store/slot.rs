//! Document slot access: one key, one JSON blob.
//!
//! # Responsibility
//! - Define the narrow [`StateSlot`] seam between the store facade and SQL.
//! - Load/save the document with tolerant read semantics.
//!
//! # Invariants
//! - Reads never fail on content problems; absent or unparsable blobs
//!   yield the default document.
//! - Writes replace the slot row synchronously; there is no merge.

use crate::model::document::{now_ms, Document, EpochMillis};
use crate::normalize::normalize;
use crate::store::StoreResult;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use serde_json::Value;

/// Storage slot key for the persisted dashboard document.
pub const STORAGE_KEY: &str = "ddash.v2";

/// Read/write access to the single persisted blob.
pub trait StateSlot {
    fn read_raw(&self) -> StoreResult<Option<String>>;
    fn write_raw(&self, value: &str) -> StoreResult<()>;
}

/// SQLite-backed slot implementation.
pub struct SqliteStateSlot<'conn> {
    conn: &'conn Connection,
    key: &'static str,
}

impl<'conn> SqliteStateSlot<'conn> {
    /// Creates a slot over the canonical storage key.
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            key: STORAGE_KEY,
        }
    }
}

impl StateSlot for SqliteStateSlot<'_> {
    fn read_raw(&self) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM slots WHERE key = ?1;",
                [self.key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_raw(&self, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO slots (key, value, written_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                written_at = excluded.written_at;",
            params![self.key, value, now_ms()],
        )?;
        Ok(())
    }
}

/// Loads the persisted document, repairing whatever is found.
///
/// An absent row and a blob that is not valid JSON both degrade to the
/// default document; only SQL transport failures surface as errors.
pub fn load_document(slot: &impl StateSlot, now: EpochMillis) -> StoreResult<Document> {
    let raw = match slot.read_raw()? {
        Some(raw) => raw,
        None => {
            info!("event=state_load module=store status=fallback reason=absent");
            return Ok(normalize(&Value::Null, now));
        }
    };

    match serde_json::from_str::<Value>(&raw) {
        Ok(value) => Ok(normalize(&value, now)),
        Err(err) => {
            warn!("event=state_load module=store status=fallback reason=unparsable error={err}");
            Ok(normalize(&Value::Null, now))
        }
    }
}

/// Serializes and overwrites the persisted document. Last write wins.
pub fn save_document(slot: &impl StateSlot, doc: &Document) -> StoreResult<()> {
    let raw = serde_json::to_string(doc).map_err(crate::store::StoreError::Json)?;
    slot.write_raw(&raw)
}
