//! Mutation intents and their pure document transitions.
//!
//! # Responsibility
//! - Define the [`Command`] intent submitted by the presentation layer.
//! - Apply every mutation as `(document, params) -> new document`.
//!
//! # Invariants
//! - No function mutates its input document; callers keep the old value
//!   for diffing and undo snapshots.
//! - List caps are enforced on insertion (12 actions, 12 threads,
//!   8 reminders), newest first.
//! - Mutations targeting a missing id return the document unchanged.

use crate::model::document::{
    Action, ActiveView, Document, EpochMillis, Reminder, Thread, NEXT_ACTIONS_CAP, REMINDERS_CAP,
    THREADS_CAP,
};
use crate::service::undo::RemovedRecord;

/// Mutation intent dispatched by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    ToggleAction { id: String },
    AddAction { text: String, domain: String },
    DeleteAction { id: String },
    AddThread { title: String, note: String },
    TouchThread { id: String },
    DeleteThread { id: String },
    AddReminder { title: String, when: String },
    StartReminder { id: String },
    SetTimerRunning { running: bool },
    TickTimer,
    ResetTimer,
    SetScratchpad { text: String },
    SetSearch { text: String },
    CycleActionsFilter,
    SetActiveView { view: ActiveView },
}

impl Command {
    /// Short label for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ToggleAction { .. } => "toggle_action",
            Self::AddAction { .. } => "add_action",
            Self::DeleteAction { .. } => "delete_action",
            Self::AddThread { .. } => "add_thread",
            Self::TouchThread { .. } => "touch_thread",
            Self::DeleteThread { .. } => "delete_thread",
            Self::AddReminder { .. } => "add_reminder",
            Self::StartReminder { .. } => "start_reminder",
            Self::SetTimerRunning { .. } => "set_timer_running",
            Self::TickTimer => "tick_timer",
            Self::ResetTimer => "reset_timer",
            Self::SetScratchpad { .. } => "set_scratchpad",
            Self::SetSearch { .. } => "set_search",
            Self::CycleActionsFilter => "cycle_actions_filter",
            Self::SetActiveView { .. } => "set_active_view",
        }
    }
}

/// Result of dispatching one command.
#[derive(Debug)]
pub struct CommandOutcome {
    /// The document after the mutation.
    pub next: Document,
    /// Removed record for deletions, so the caller can arm undo.
    pub removed: Option<RemovedRecord>,
}

/// Applies one command to the document.
pub fn dispatch(doc: &Document, command: &Command, now: EpochMillis) -> CommandOutcome {
    let mut removed = None;
    let next = match command {
        Command::ToggleAction { id } => toggle_action(doc, id, now),
        Command::AddAction { text, domain } => add_action(doc, text, domain, now),
        Command::DeleteAction { id } => {
            let (next, taken) = delete_action(doc, id);
            removed = taken.map(|(record, index)| RemovedRecord::Action { record, index });
            next
        }
        Command::AddThread { title, note } => add_thread(doc, title, note, now),
        Command::TouchThread { id } => touch_thread(doc, id, now),
        Command::DeleteThread { id } => {
            let (next, taken) = delete_thread(doc, id);
            removed = taken.map(|(record, index)| RemovedRecord::Thread { record, index });
            next
        }
        Command::AddReminder { title, when } => add_reminder(doc, title, when, now),
        Command::StartReminder { id } => start_reminder(doc, id, now),
        Command::SetTimerRunning { running } => set_timer_running(doc, *running),
        Command::TickTimer => tick_timer(doc),
        Command::ResetTimer => reset_timer(doc),
        Command::SetScratchpad { text } => set_scratchpad(doc, text),
        Command::SetSearch { text } => set_search(doc, text),
        Command::CycleActionsFilter => cycle_actions_filter(doc),
        Command::SetActiveView { view } => set_active_view(doc, *view),
    };
    CommandOutcome { next, removed }
}

/// Flips an action's done flag, keeping `completed_at` consistent.
pub fn toggle_action(doc: &Document, id: &str, now: EpochMillis) -> Document {
    let mut next = doc.clone();
    if let Some(action) = next.next_actions.iter_mut().find(|a| a.id == id) {
        let done = !action.done;
        action.set_done(done, now);
    }
    next
}

/// Prepends a new action and truncates the list to its cap.
pub fn add_action(doc: &Document, text: &str, domain: &str, now: EpochMillis) -> Document {
    let mut next = doc.clone();
    next.next_actions.insert(0, Action::new(text, domain, now));
    next.next_actions.truncate(NEXT_ACTIONS_CAP);
    next
}

/// Removes an action by id, returning it with its origin index.
pub fn delete_action(doc: &Document, id: &str) -> (Document, Option<(Action, usize)>) {
    let mut next = doc.clone();
    match next.next_actions.iter().position(|a| a.id == id) {
        Some(index) => {
            let record = next.next_actions.remove(index);
            (next, Some((record, index)))
        }
        None => (next, None),
    }
}

/// Prepends a new thread and truncates the list to its cap.
pub fn add_thread(doc: &Document, title: &str, note: &str, now: EpochMillis) -> Document {
    let mut next = doc.clone();
    next.threads.insert(0, Thread::new(title, note, now));
    next.threads.truncate(THREADS_CAP);
    next
}

/// Bumps a thread's recency stamp.
pub fn touch_thread(doc: &Document, id: &str, now: EpochMillis) -> Document {
    let mut next = doc.clone();
    if let Some(thread) = next.threads.iter_mut().find(|t| t.id == id) {
        thread.touch(now);
    }
    next
}

/// Removes a thread by id, returning it with its origin index.
pub fn delete_thread(doc: &Document, id: &str) -> (Document, Option<(Thread, usize)>) {
    let mut next = doc.clone();
    match next.threads.iter().position(|t| t.id == id) {
        Some(index) => {
            let record = next.threads.remove(index);
            (next, Some((record, index)))
        }
        None => (next, None),
    }
}

/// Prepends a new pending reminder and truncates the list to its cap.
pub fn add_reminder(doc: &Document, title: &str, when: &str, now: EpochMillis) -> Document {
    let mut next = doc.clone();
    next.reminders.insert(0, Reminder::new(title, when, now));
    next.reminders.truncate(REMINDERS_CAP);
    next
}

/// Starts a reminder: in_progress status, one-shot `started_at`, focus
/// pointer, running timer.
pub fn start_reminder(doc: &Document, id: &str, now: EpochMillis) -> Document {
    let mut next = doc.clone();
    if let Some(reminder) = next.reminders.iter_mut().find(|r| r.id == id) {
        reminder.start(now);
        next.focus_now.current = reminder.title.clone();
        next.timer.running = true;
    }
    next
}

pub fn set_timer_running(doc: &Document, running: bool) -> Document {
    let mut next = doc.clone();
    next.timer.running = running;
    next
}

/// Advances the stopwatch by one second.
pub fn tick_timer(doc: &Document) -> Document {
    let mut next = doc.clone();
    next.timer.seconds = next.timer.seconds.saturating_add(1);
    next
}

pub fn reset_timer(doc: &Document) -> Document {
    let mut next = doc.clone();
    next.timer.running = false;
    next.timer.seconds = 0;
    next
}

pub fn set_scratchpad(doc: &Document, text: &str) -> Document {
    let mut next = doc.clone();
    next.scratchpad.text = text.to_string();
    next
}

pub fn set_search(doc: &Document, text: &str) -> Document {
    let mut next = doc.clone();
    next.ui.search = text.to_string();
    next
}

/// Advances the actions filter open → done → all → open.
pub fn cycle_actions_filter(doc: &Document) -> Document {
    let mut next = doc.clone();
    next.ui.actions_filter = next.ui.actions_filter.cycle();
    next
}

pub fn set_active_view(doc: &Document, view: ActiveView) -> Document {
    let mut next = doc.clone();
    next.ui.active_view = view;
    next
}
