//! Canonical dashboard document model.
//!
//! # Responsibility
//! - Define the single JSON-serializable document the store persists.
//! - Provide the canonical first-run defaults.
//!
//! # Invariants
//! - Every record carries a unique, stable `id`.
//! - `Action::done == true` exactly when `completed_at` is set.
//! - Wire field names stay camelCase for compatibility with documents
//!   written by earlier versions of the app.

pub mod document;
