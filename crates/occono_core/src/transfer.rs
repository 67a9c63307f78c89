//! Versioned document export and tolerant import.
//!
//! # Responsibility
//! - Produce the export envelope and its download file name.
//! - Parse import payloads in envelope or bare-document form.
//!
//! # Invariants
//! - `export_envelope(doc).state` equals `doc`.
//! - Every imported candidate is routed through the Normalizer, so older
//!   or foreign exports upgrade to the current schema.
//! - Invalid JSON is a distinct, user-reportable failure and never touches
//!   existing state.

use crate::model::document::{Document, EpochMillis};
use crate::normalize::{coerce_flag, normalize};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Current export schema version.
pub const SCHEMA_VERSION: u32 = 2;

/// User-visible import failure.
#[derive(Debug)]
pub enum ImportError {
    /// Payload text is not valid JSON.
    InvalidJson { message: String },
    /// Payload parsed, but the candidate document is not an object.
    NotAnObject,
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidJson { message } => write!(f, "import failed: invalid JSON: {message}"),
            Self::NotAnObject => write!(f, "import failed: expected an object"),
        }
    }
}

impl Error for ImportError {}

/// Download envelope wrapping one exported document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    /// RFC 3339 / ISO-8601 export timestamp.
    pub exported_at: String,
    pub version: u32,
    /// Storage slot identifier the document came from.
    pub key: String,
    pub state: Document,
}

/// Wraps a document in the current export envelope.
pub fn export_envelope(doc: &Document, exported_at: DateTime<Utc>) -> ExportEnvelope {
    ExportEnvelope {
        exported_at: exported_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        version: SCHEMA_VERSION,
        key: crate::store::STORAGE_KEY.to_string(),
        state: doc.clone(),
    }
}

/// Returns the download file name for an export taken on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("occono-done-export-{}.json", date.format("%Y-%m-%d"))
}

/// Parses an import payload and normalizes it to the current schema.
///
/// Accepts either a bare document or an envelope carrying a `state` field.
/// The candidate is always normalized, so partial and legacy payloads come
/// back well-formed.
pub fn import_payload(text: &str, now: EpochMillis) -> Result<Document, ImportError> {
    let parsed: Value = serde_json::from_str(text).map_err(|err| ImportError::InvalidJson {
        message: err.to_string(),
    })?;

    let candidate = match parsed.get("state") {
        Some(state) if coerce_flag(Some(state)) => state,
        _ => &parsed,
    };

    if !candidate.is_object() {
        return Err(ImportError::NotAnObject);
    }

    Ok(normalize(candidate, now))
}
