//! Presentation-facing list read models.
//!
//! # Responsibility
//! - Derive the visible action/thread lists from the persisted UI prefs.
//!
//! # Invariants
//! - Pure and deterministic; same document, same output.
//! - Ordering is most-recently-touched first, with a stable sort so equal
//!   timestamps keep document order.

use crate::model::document::{Action, ActionsFilter, Document, Thread};

/// Actions visible under the current filter and search, newest touch first.
pub fn visible_actions(doc: &Document) -> Vec<Action> {
    let search = &doc.ui.search;
    let mut shown: Vec<Action> = doc
        .next_actions
        .iter()
        .filter(|action| match doc.ui.actions_filter {
            ActionsFilter::Open => !action.done,
            ActionsFilter::Done => action.done,
            ActionsFilter::All => true,
        })
        .filter(|action| {
            let status_label = if action.done { "done" } else { "open" };
            matches_search(search, &[&action.text, &action.domain, status_label])
        })
        .cloned()
        .collect();
    shown.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    shown
}

/// Threads visible under the current search, newest touch first.
pub fn visible_threads(doc: &Document) -> Vec<Thread> {
    let search = &doc.ui.search;
    let mut shown: Vec<Thread> = doc
        .threads
        .iter()
        .filter(|thread| matches_search(search, &[&thread.title, &thread.note]))
        .cloned()
        .collect();
    shown.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    shown
}

/// Case-insensitive substring match; a blank query matches everything.
fn matches_search(query: &str, fields: &[&str]) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}
