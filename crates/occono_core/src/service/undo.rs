//! Time-boxed undo for record deletions.
//!
//! # Responsibility
//! - Hold the single pending deleted record with its origin index.
//! - Decide expiry deterministically from caller-supplied clocks.
//!
//! # Invariants
//! - At most one undo is pending; arming replaces the previous one
//!   irrevocably.
//! - Undo state is transient and never persisted.
//! - An expiry check only clears a pending undo that is actually due, so
//!   a late check can never clear a newer one.

use crate::model::document::{Action, Document, EpochMillis, Thread};

/// How long a deleted record stays restorable.
pub const UNDO_WINDOW_MS: i64 = 8_000;

/// A record removed from the document, with its origin position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemovedRecord {
    Action { record: Action, index: usize },
    Thread { record: Thread, index: usize },
}

impl RemovedRecord {
    /// Re-inserts the record, clamping the origin index into the current
    /// list bounds.
    pub fn restore(self, doc: &Document) -> Document {
        let mut next = doc.clone();
        match self {
            Self::Action { record, index } => {
                let at = index.min(next.next_actions.len());
                next.next_actions.insert(at, record);
            }
            Self::Thread { record, index } => {
                let at = index.min(next.threads.len());
                next.threads.insert(at, record);
            }
        }
        next
    }

    /// Short label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Action { .. } => "action",
            Self::Thread { .. } => "thread",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingUndo {
    removed: RemovedRecord,
    expires_at: EpochMillis,
}

/// The single transient undo slot.
#[derive(Debug, Default)]
pub struct UndoSlot {
    pending: Option<PendingUndo>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the slot, replacing any previously pending undo.
    pub fn arm(&mut self, removed: RemovedRecord, now: EpochMillis) {
        self.pending = Some(PendingUndo {
            removed,
            expires_at: now + UNDO_WINDOW_MS,
        });
    }

    /// Consumes the pending record if its window is still open.
    ///
    /// An expired record is discarded either way; the slot is always empty
    /// afterwards.
    pub fn take_live(&mut self, now: EpochMillis) -> Option<RemovedRecord> {
        let pending = self.pending.take()?;
        if now < pending.expires_at {
            Some(pending.removed)
        } else {
            None
        }
    }

    /// Clears the pending undo when its window has elapsed.
    ///
    /// Returns whether something was cleared.
    pub fn expire_if_due(&mut self, now: EpochMillis) -> bool {
        match &self.pending {
            Some(pending) if now >= pending.expires_at => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }

    /// Drops any pending undo unconditionally.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
