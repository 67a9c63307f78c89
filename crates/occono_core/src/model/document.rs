//! Dashboard document types and first-run defaults.
//!
//! # Responsibility
//! - Define the root [`Document`] and every record it contains.
//! - Provide [`Document::defaults`], the canonical first-run state and the
//!   fallback source for normalization.
//!
//! # Invariants
//! - `defaults` returns an independent value on every call; callers may
//!   mutate the result freely.
//! - Timestamps are Unix epoch milliseconds.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unix epoch milliseconds, the timestamp unit used across the document.
pub type EpochMillis = i64;

/// Maximum number of next actions kept in the document.
pub const NEXT_ACTIONS_CAP: usize = 12;
/// Maximum number of threads kept in the document.
pub const THREADS_CAP: usize = 12;
/// Maximum number of reminders kept in the document.
pub const REMINDERS_CAP: usize = 8;

/// Returns the current wall clock in epoch milliseconds.
pub fn now_ms() -> EpochMillis {
    chrono::Utc::now().timestamp_millis()
}

/// Generates a fresh stable record id.
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

/// Root document persisted as one JSON blob in the storage slot.
///
/// This is the single source of truth the presentation layer renders from.
/// Every mutation produces a new `Document`; nothing mutates a rendered
/// document in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub user: UserProfile,
    /// Legacy stored counters; live numbers come from derived analytics.
    pub kpis: Kpis,
    pub focus_now: FocusNow,
    pub next_actions: Vec<Action>,
    pub reminders: Vec<Reminder>,
    pub threads: Vec<Thread>,
    pub scratchpad: Scratchpad,
    pub timer: Timer,
    pub ui: UiPrefs,
    pub integrations: Integrations,
}

/// Owner of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

/// Stored KPI counters shown on the dashboard tiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub active_threads: u32,
    pub open_loops: u32,
    pub waiting_on: u32,
    pub momentum: u32,
}

/// Focus card copy plus the "current focus" pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusNow {
    pub title: String,
    pub subtitle: String,
    pub current: String,
}

/// A single executable next action.
///
/// # Invariants
/// - `id` is unique within the document and immutable after creation.
/// - `completed_at` is `Some` exactly when `done` is `true`; `done` is the
///   source of truth and normalization re-derives `completed_at` from it.
/// - `updated_at` is bumped on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    pub text: String,
    pub done: bool,
    /// Free-text life domain tag (`""` when untagged).
    pub domain: String,
    pub created_at: EpochMillis,
    pub updated_at: EpochMillis,
    pub completed_at: Option<EpochMillis>,
}

impl Action {
    /// Creates a new open action with fresh id and timestamps.
    pub fn new(text: impl Into<String>, domain: impl Into<String>, now: EpochMillis) -> Self {
        Self {
            id: new_record_id(),
            text: text.into(),
            done: false,
            domain: domain.into(),
            created_at: now,
            updated_at: now,
            completed_at: None,
        }
    }

    /// Sets the done flag, keeping `completed_at` consistent with it.
    pub fn set_done(&mut self, done: bool, now: EpochMillis) {
        self.done = done;
        self.completed_at = if done { Some(now) } else { None };
        self.updated_at = now;
    }
}

/// A standing topic or life area the user keeps attending to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: String,
    pub title: String,
    pub note: String,
    pub created_at: EpochMillis,
    /// Recency signal; "touching" a thread bumps only this field.
    pub updated_at: EpochMillis,
}

impl Thread {
    /// Creates a new thread with fresh id and timestamps.
    pub fn new(title: impl Into<String>, note: impl Into<String>, now: EpochMillis) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            note: note.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the thread as recently attended to.
    pub fn touch(&mut self, now: EpochMillis) {
        self.updated_at = now;
    }
}

/// Lifecycle state of a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Pending,
    InProgress,
    Done,
}

impl ReminderStatus {
    /// Parses a wire value, rejecting anything outside the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "in_progress" => Some(Self::InProgress),
            "done" => Some(Self::Done),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }
}

/// A scheduled commitment with a call-to-action.
///
/// # Invariants
/// - `started_at` is set exactly once, on the first pending→in_progress
///   transition; re-starting never resets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: String,
    pub title: String,
    /// Human-readable schedule text, e.g. `"Today 2:00–4:00pm"`.
    pub when: String,
    /// Call-to-action label shown on the card.
    pub cta: String,
    pub status: ReminderStatus,
    pub created_at: EpochMillis,
    pub updated_at: EpochMillis,
    pub started_at: Option<EpochMillis>,
}

impl Reminder {
    /// Creates a new pending reminder with fresh id and timestamps.
    pub fn new(title: impl Into<String>, when: impl Into<String>, now: EpochMillis) -> Self {
        Self {
            id: new_record_id(),
            title: title.into(),
            when: when.into(),
            cta: "Start".to_string(),
            status: ReminderStatus::Pending,
            created_at: now,
            updated_at: now,
            started_at: None,
        }
    }

    /// Moves the reminder into `in_progress`, stamping `started_at` only on
    /// the first start.
    pub fn start(&mut self, now: EpochMillis) {
        self.status = ReminderStatus::InProgress;
        if self.started_at.is_none() {
            self.started_at = Some(now);
        }
        self.updated_at = now;
    }
}

/// Freeform capture area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scratchpad {
    pub text: String,
}

/// Work stopwatch; `seconds` advances once per tick while `running`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timer {
    pub running: bool,
    pub seconds: u64,
}

/// Which done-state bucket the actions list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionsFilter {
    Open,
    Done,
    All,
}

impl ActionsFilter {
    /// Parses a wire value, rejecting anything outside the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "done" => Some(Self::Done),
            "all" => Some(Self::All),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Done => "done",
            Self::All => "all",
        }
    }

    /// Advances open → done → all → open.
    pub fn cycle(self) -> Self {
        match self {
            Self::Open => Self::Done,
            Self::Done => Self::All,
            Self::All => Self::Open,
        }
    }
}

/// Which top-level view the app is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    Dashboard,
    Tasks,
    Calendar,
    Analytics,
    Team,
}

impl ActiveView {
    /// Parses a wire value, rejecting anything outside the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dashboard" => Some(Self::Dashboard),
            "tasks" => Some(Self::Tasks),
            "calendar" => Some(Self::Calendar),
            "analytics" => Some(Self::Analytics),
            "team" => Some(Self::Team),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Tasks => "tasks",
            Self::Calendar => "calendar",
            Self::Analytics => "analytics",
            Self::Team => "team",
        }
    }
}

/// Persisted UI preferences, so filters and search survive reloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPrefs {
    pub search: String,
    pub actions_filter: ActionsFilter,
    pub active_view: ActiveView,
}

/// Reserved integration stubs; always present, never required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Integrations {
    pub openclaw: OpenclawConfig,
}

/// Connection mode of the reserved OpenClaw integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenclawMode {
    Off,
    Local,
    Remote,
}

impl OpenclawMode {
    /// Parses a wire value, rejecting anything outside the enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "off" => Some(Self::Off),
            "local" => Some(Self::Local),
            "remote" => Some(Self::Remote),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

/// Inert placeholder for a future personal-AI hookup. No secrets live here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenclawConfig {
    pub enabled: bool,
    pub mode: OpenclawMode,
    pub endpoint: String,
    pub notes: String,
    pub last_seen_at: Option<EpochMillis>,
}

impl Document {
    /// Builds the canonical first-run document.
    ///
    /// Seeded record timestamps are `now`. Each call constructs a fresh,
    /// independent value.
    pub fn defaults(now: EpochMillis) -> Self {
        Self {
            user: UserProfile {
                name: "Darren".to_string(),
                email: "you@example.com".to_string(),
            },
            kpis: Kpis {
                active_threads: 6,
                open_loops: 12,
                waiting_on: 3,
                momentum: 4,
            },
            focus_now: FocusNow {
                title: "Focus Session".to_string(),
                subtitle: "Pick ONE thing. Close ONE loop.".to_string(),
                current: "Clear the highest-friction open loop".to_string(),
            },
            next_actions: vec![
                seed_action("a1", "20 min walk (no phone)", "health", now),
                seed_action(
                    "a2",
                    "Handle 1 money/admin task (pay, file, book, cancel)",
                    "money",
                    now,
                ),
                seed_action(
                    "a3",
                    "Move 1 business thread forward (one concrete step)",
                    "business",
                    now,
                ),
                seed_action("a4", "Home: do the smallest next physical action", "home", now),
            ],
            reminders: vec![Reminder {
                id: "r1".to_string(),
                title: "Next commitment".to_string(),
                when: "Today 2:00–4:00pm".to_string(),
                cta: "Start".to_string(),
                status: ReminderStatus::Pending,
                created_at: now,
                updated_at: now,
                started_at: None,
            }],
            threads: vec![
                seed_thread(
                    "t_health",
                    "Health & Energy",
                    "Sleep, movement, food, stress. Keep the basics strong.",
                    now,
                ),
                seed_thread(
                    "t_business",
                    "Business",
                    "Revenue, delivery, ops. One move at a time.",
                    now,
                ),
                seed_thread(
                    "t_home",
                    "Home & Family",
                    "Household, relationships, life logistics.",
                    now,
                ),
                seed_thread(
                    "t_money",
                    "Money & Admin",
                    "Bills, paperwork, scheduling, accounts.",
                    now,
                ),
                seed_thread(
                    "t_media",
                    "Media Machine / Homelab",
                    "Ripping, Jellyfin, Pi stability, backups.",
                    now,
                ),
                seed_thread(
                    "t_ai",
                    "Personal AI (OpenClaw)",
                    "Deploy + integrate safely. Guardrails first.",
                    now,
                ),
            ],
            scratchpad: Scratchpad {
                text: String::new(),
            },
            timer: Timer {
                running: false,
                seconds: 0,
            },
            ui: UiPrefs {
                search: String::new(),
                actions_filter: ActionsFilter::Open,
                active_view: ActiveView::Dashboard,
            },
            integrations: Integrations {
                openclaw: OpenclawConfig {
                    enabled: false,
                    mode: OpenclawMode::Off,
                    endpoint: String::new(),
                    notes: "Reserved for future OpenClaw dashboard access.".to_string(),
                    last_seen_at: None,
                },
            },
        }
    }
}

fn seed_action(id: &str, text: &str, domain: &str, now: EpochMillis) -> Action {
    Action {
        id: id.to_string(),
        text: text.to_string(),
        done: false,
        domain: domain.to_string(),
        created_at: now,
        updated_at: now,
        completed_at: None,
    }
}

fn seed_thread(id: &str, title: &str, note: &str, now: EpochMillis) -> Thread {
    Thread {
        id: id.to_string(),
        title: title.to_string(),
        note: note.to_string(),
        created_at: now,
        updated_at: now,
    }
}

/// Formats stopwatch seconds as `HH:MM:SS` for display.
pub fn format_hms(seconds: u64) -> String {
    let hh = seconds / 3600;
    let mm = (seconds % 3600) / 60;
    let ss = seconds % 60;
    format!("{hh:02}:{mm:02}:{ss:02}")
}

#[cfg(test)]
mod tests {
    use super::{format_hms, Document};

    #[test]
    fn defaults_are_independent_per_call() {
        let mut first = Document::defaults(1_000);
        let second = Document::defaults(1_000);
        first.next_actions.clear();
        assert_eq!(second.next_actions.len(), 4);
    }

    #[test]
    fn format_hms_pads_all_fields() {
        assert_eq!(format_hms(0), "00:00:00");
        assert_eq!(format_hms(3_671), "01:01:11");
    }
}
