//! Store facade owning the live document and its transient undo state.
//!
//! # Responsibility
//! - Apply commands, arm undo on deletions, persist after every mutation.
//! - Run import/export against the live document.
//!
//! # Invariants
//! - Every applied mutation is persisted before `apply` returns.
//! - Starting an import invalidates any pending undo, even when the
//!   payload later fails to parse.
//! - Facade calls never panic; failures come back as [`DashboardError`].

use crate::model::document::{Document, EpochMillis};
use crate::service::command::{dispatch, Command};
use crate::service::undo::UndoSlot;
use crate::store::{load_document, save_document, StateSlot, StoreError};
use crate::transfer::{export_envelope, import_payload, ExportEnvelope, ImportError};
use chrono::{DateTime, Utc};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Facade-level error: persistence or import failure.
#[derive(Debug)]
pub enum DashboardError {
    Store(StoreError),
    Import(ImportError),
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Import(err) => write!(f, "{err}"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Import(err) => Some(err),
        }
    }
}

impl From<StoreError> for DashboardError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<ImportError> for DashboardError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

/// The State Store: one live document behind a persistence slot.
pub struct DashboardService<S: StateSlot> {
    slot: S,
    doc: Document,
    undo: UndoSlot,
}

impl<S: StateSlot> DashboardService<S> {
    /// Loads the persisted document (or defaults) and wraps the slot.
    pub fn open(slot: S, now: EpochMillis) -> Result<Self, DashboardError> {
        let doc = load_document(&slot, now)?;
        Ok(Self {
            slot,
            doc,
            undo: UndoSlot::new(),
        })
    }

    /// The current in-memory document.
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Applies one command and persists the result.
    ///
    /// Deletions arm the undo slot, replacing any previous pending undo.
    pub fn apply(&mut self, command: &Command, now: EpochMillis) -> Result<(), DashboardError> {
        let outcome = dispatch(&self.doc, command, now);
        if let Some(removed) = outcome.removed {
            info!(
                "event=undo_armed module=service kind={}",
                removed.kind()
            );
            self.undo.arm(removed, now);
        }
        self.doc = outcome.next;
        save_document(&self.slot, &self.doc)?;
        info!(
            "event=command_applied module=service kind={}",
            command.kind()
        );
        Ok(())
    }

    /// Restores the pending deleted record if its window is still open.
    ///
    /// Returns whether a restore happened.
    pub fn undo(&mut self, now: EpochMillis) -> Result<bool, DashboardError> {
        match self.undo.take_live(now) {
            Some(removed) => {
                self.doc = removed.restore(&self.doc);
                save_document(&self.slot, &self.doc)?;
                info!("event=undo_applied module=service status=ok");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Drops the pending undo once its window has elapsed.
    pub fn expire_undo(&mut self, now: EpochMillis) -> bool {
        self.undo.expire_if_due(now)
    }

    pub fn has_pending_undo(&self) -> bool {
        self.undo.is_armed()
    }

    /// Replaces the document with an imported payload.
    ///
    /// Parse failures leave the current document untouched; the pending
    /// undo is invalidated either way.
    pub fn import(&mut self, text: &str, now: EpochMillis) -> Result<(), DashboardError> {
        self.undo.clear();
        let incoming = match import_payload(text, now) {
            Ok(doc) => doc,
            Err(err) => {
                info!("event=state_import module=service status=error error={err}");
                return Err(err.into());
            }
        };
        self.doc = incoming;
        save_document(&self.slot, &self.doc)?;
        info!("event=state_import module=service status=ok");
        Ok(())
    }

    /// Wraps the current document in an export envelope.
    pub fn export(&self, exported_at: DateTime<Utc>) -> ExportEnvelope {
        export_envelope(&self.doc, exported_at)
    }
}
