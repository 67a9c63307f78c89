//! Core state engine for the Occono Done dashboard.
//! This crate is the single source of truth for document invariants.

pub mod logging;
pub mod model;
pub mod normalize;
pub mod service;
pub mod store;
pub mod transfer;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{
    format_hms, now_ms, Action, ActionsFilter, ActiveView, Document, EpochMillis, Reminder,
    ReminderStatus, Thread, Timer, UiPrefs,
};
pub use normalize::normalize;
pub use service::analytics::{compute as compute_analytics, Analytics, CompletionHistogram};
pub use service::command::{dispatch, Command, CommandOutcome};
pub use service::dashboard::{DashboardError, DashboardService};
pub use service::undo::{RemovedRecord, UndoSlot, UNDO_WINDOW_MS};
pub use service::view::{visible_actions, visible_threads};
pub use store::{
    load_document, open_store, open_store_in_memory, save_document, SqliteStateSlot, StateSlot,
    StoreError, StoreResult, STORAGE_KEY,
};
pub use transfer::{
    export_envelope, export_file_name, import_payload, ExportEnvelope, ImportError, SCHEMA_VERSION,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
