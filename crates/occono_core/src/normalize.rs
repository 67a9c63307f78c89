//! Schema normalization for loaded and imported documents.
//!
//! # Responsibility
//! - Turn arbitrary JSON into a well-formed [`Document`].
//! - Repair partial or legacy data field by field instead of rejecting it.
//!
//! # Invariants
//! - `normalize` is total: any JSON input yields a full document.
//! - `normalize` is idempotent: re-normalizing its own output (for the
//!   same `now`) changes nothing.
//! - A corrupt record inside an array drops or repairs only that record,
//!   never the whole array.
//! - `done` is the source of truth for `completed_at`.

use crate::model::document::{
    Action, ActionsFilter, ActiveView, Document, EpochMillis, FocusNow, Integrations, Kpis,
    OpenclawConfig, OpenclawMode, Reminder, ReminderStatus, Scratchpad, Thread, Timer, UiPrefs,
    UserProfile,
};
use serde_json::{Map, Value};

/// Normalizes arbitrary JSON into a well-formed document.
///
/// Non-object roots (including `null`) yield the full default document.
/// Known top-level keys are coerced individually; unknown keys are dropped.
pub fn normalize(raw: &Value, now: EpochMillis) -> Document {
    let defaults = Document::defaults(now);
    let root = match raw.as_object() {
        Some(map) => map,
        None => return defaults,
    };

    Document {
        user: normalize_user(root.get("user"), &defaults.user),
        kpis: normalize_kpis(root.get("kpis"), &defaults.kpis),
        focus_now: normalize_focus(root.get("focusNow"), &defaults.focus_now),
        next_actions: normalize_actions(root.get("nextActions"), &defaults.next_actions, now),
        reminders: normalize_reminders(root.get("reminders"), &defaults.reminders, now),
        threads: normalize_threads(root.get("threads"), &defaults.threads, now),
        scratchpad: normalize_scratchpad(root.get("scratchpad")),
        timer: normalize_timer(root.get("timer")),
        ui: normalize_ui(root.get("ui")),
        integrations: normalize_integrations(root.get("integrations"), &defaults.integrations),
    }
}

fn normalize_actions(raw: Option<&Value>, fallback: &[Action], now: EpochMillis) -> Vec<Action> {
    let items = match raw.and_then(Value::as_array) {
        Some(items) => items,
        None => return fallback.to_vec(),
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| coerce_action(entry, now))
        .collect()
}

fn coerce_action(entry: &Map<String, Value>, now: EpochMillis) -> Action {
    let created_at = coerce_epoch(entry.get("createdAt"), now);
    let updated_at = coerce_epoch(entry.get("updatedAt"), created_at);
    let done = coerce_flag(entry.get("done"));
    // done wins over whatever completedAt was stored.
    let completed_at = if done {
        opt_epoch(entry.get("completedAt")).or(Some(updated_at))
    } else {
        None
    };
    Action {
        id: coerce_id(entry.get("id")),
        text: coerce_string(entry.get("text"), ""),
        done,
        domain: coerce_string(entry.get("domain"), ""),
        created_at,
        updated_at,
        completed_at,
    }
}

fn normalize_threads(raw: Option<&Value>, fallback: &[Thread], now: EpochMillis) -> Vec<Thread> {
    let items = match raw.and_then(Value::as_array) {
        Some(items) => items,
        None => return fallback.to_vec(),
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            let created_at = coerce_epoch(entry.get("createdAt"), now);
            Thread {
                id: coerce_id(entry.get("id")),
                title: coerce_string(entry.get("title"), "Untitled"),
                note: coerce_string(entry.get("note"), ""),
                created_at,
                updated_at: coerce_epoch(entry.get("updatedAt"), created_at),
            }
        })
        .collect()
}

fn normalize_reminders(
    raw: Option<&Value>,
    fallback: &[Reminder],
    now: EpochMillis,
) -> Vec<Reminder> {
    let items = match raw.and_then(Value::as_array) {
        Some(items) => items,
        None => return fallback.to_vec(),
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            let created_at = coerce_epoch(entry.get("createdAt"), now);
            Reminder {
                id: coerce_id(entry.get("id")),
                title: coerce_string(entry.get("title"), "Untitled"),
                when: coerce_string(entry.get("when"), ""),
                cta: coerce_string(entry.get("cta"), "Start"),
                status: entry
                    .get("status")
                    .and_then(Value::as_str)
                    .and_then(ReminderStatus::parse)
                    .unwrap_or(ReminderStatus::Pending),
                created_at,
                updated_at: coerce_epoch(entry.get("updatedAt"), created_at),
                started_at: opt_epoch(entry.get("startedAt")),
            }
        })
        .collect()
}

fn normalize_user(raw: Option<&Value>, fallback: &UserProfile) -> UserProfile {
    let entry = match raw.and_then(Value::as_object) {
        Some(entry) => entry,
        None => return fallback.clone(),
    };
    UserProfile {
        name: coerce_string(entry.get("name"), &fallback.name),
        email: coerce_string(entry.get("email"), &fallback.email),
    }
}

fn normalize_kpis(raw: Option<&Value>, fallback: &Kpis) -> Kpis {
    let entry = match raw.and_then(Value::as_object) {
        Some(entry) => entry,
        None => return fallback.clone(),
    };
    Kpis {
        active_threads: coerce_count(entry.get("activeThreads"), fallback.active_threads),
        open_loops: coerce_count(entry.get("openLoops"), fallback.open_loops),
        waiting_on: coerce_count(entry.get("waitingOn"), fallback.waiting_on),
        momentum: coerce_count(entry.get("momentum"), fallback.momentum),
    }
}

fn normalize_focus(raw: Option<&Value>, fallback: &FocusNow) -> FocusNow {
    let entry = match raw.and_then(Value::as_object) {
        Some(entry) => entry,
        None => return fallback.clone(),
    };
    FocusNow {
        title: coerce_string(entry.get("title"), &fallback.title),
        subtitle: coerce_string(entry.get("subtitle"), &fallback.subtitle),
        current: coerce_string(entry.get("current"), &fallback.current),
    }
}

fn normalize_scratchpad(raw: Option<&Value>) -> Scratchpad {
    let entry = match raw.and_then(Value::as_object) {
        Some(entry) => entry,
        None => return Scratchpad { text: String::new() },
    };
    Scratchpad {
        text: coerce_string(entry.get("text"), ""),
    }
}

fn normalize_timer(raw: Option<&Value>) -> Timer {
    let entry = match raw.and_then(Value::as_object) {
        Some(entry) => entry,
        None => {
            return Timer {
                running: false,
                seconds: 0,
            }
        }
    };
    Timer {
        running: coerce_flag(entry.get("running")),
        seconds: coerce_seconds(entry.get("seconds")),
    }
}

fn normalize_ui(raw: Option<&Value>) -> UiPrefs {
    let entry = match raw.and_then(Value::as_object) {
        Some(entry) => entry,
        None => {
            return UiPrefs {
                search: String::new(),
                actions_filter: ActionsFilter::Open,
                active_view: ActiveView::Dashboard,
            }
        }
    };
    UiPrefs {
        search: coerce_string(entry.get("search"), ""),
        actions_filter: entry
            .get("actionsFilter")
            .and_then(Value::as_str)
            .and_then(ActionsFilter::parse)
            .unwrap_or(ActionsFilter::Open),
        active_view: entry
            .get("activeView")
            .and_then(Value::as_str)
            .and_then(ActiveView::parse)
            .unwrap_or(ActiveView::Dashboard),
    }
}

fn normalize_integrations(raw: Option<&Value>, fallback: &Integrations) -> Integrations {
    let entry = match raw.and_then(Value::as_object) {
        Some(entry) => entry,
        None => return fallback.clone(),
    };
    Integrations {
        openclaw: normalize_openclaw(entry.get("openclaw"), &fallback.openclaw),
    }
}

fn normalize_openclaw(raw: Option<&Value>, fallback: &OpenclawConfig) -> OpenclawConfig {
    let entry = match raw.and_then(Value::as_object) {
        Some(entry) => entry,
        None => return fallback.clone(),
    };
    OpenclawConfig {
        enabled: coerce_flag(entry.get("enabled")),
        mode: entry
            .get("mode")
            .and_then(Value::as_str)
            .and_then(OpenclawMode::parse)
            .unwrap_or(OpenclawMode::Off),
        endpoint: coerce_string(entry.get("endpoint"), ""),
        notes: coerce_string(entry.get("notes"), ""),
        last_seen_at: opt_epoch(entry.get("lastSeenAt")),
    }
}

fn coerce_id(raw: Option<&Value>) -> String {
    match raw.and_then(Value::as_str) {
        Some(id) => id.to_string(),
        None => crate::model::document::new_record_id(),
    }
}

fn coerce_string(raw: Option<&Value>, fallback: &str) -> String {
    match raw.and_then(Value::as_str) {
        Some(text) => text.to_string(),
        None => fallback.to_string(),
    }
}

/// JS-truthiness coercion; the wire format predates typed booleans.
pub(crate) fn coerce_flag(raw: Option<&Value>) -> bool {
    match raw {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::Number(number)) => number.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn coerce_epoch(raw: Option<&Value>, fallback: EpochMillis) -> EpochMillis {
    opt_epoch(raw).unwrap_or(fallback)
}

fn opt_epoch(raw: Option<&Value>) -> Option<EpochMillis> {
    let number = raw?.as_i64().or_else(|| raw?.as_f64().map(|n| n as i64))?;
    Some(number)
}

fn coerce_count(raw: Option<&Value>, fallback: u32) -> u32 {
    match raw.and_then(Value::as_i64) {
        Some(count) => count.clamp(0, i64::from(u32::MAX)) as u32,
        None => fallback,
    }
}

fn coerce_seconds(raw: Option<&Value>) -> u64 {
    raw.and_then(Value::as_i64).map_or(0, |n| n.max(0) as u64)
}
