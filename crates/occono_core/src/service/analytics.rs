//! Derived dashboard analytics.
//!
//! # Responsibility
//! - Compute KPI numbers and the weekly completion histogram on read.
//!
//! # Invariants
//! - Nothing here is stored; every value is re-derived from the document
//!   and the caller's clock.
//! - Histogram bins run oldest first, today last.

use crate::model::document::{Action, Document, EpochMillis};
use once_cell::sync::Lazy;
use regex::Regex;

/// One day in epoch milliseconds.
pub const DAY_MS: i64 = 86_400_000;
/// Recency window for `active_threads` and `momentum`.
pub const RECENT_WINDOW_MS: i64 = 7 * DAY_MS;
/// Number of histogram bins (one per day, ending today).
pub const HISTOGRAM_BINS: usize = 7;

/// Known-heuristic matcher: flags records that mention waiting on someone.
/// Free-text matching, so false positives/negatives are expected.
static WAITING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)waiting").expect("valid waiting regex"));

/// Live KPI numbers derived from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analytics {
    /// Undone actions.
    pub open_loops: u32,
    /// Actions whose text or domain mentions "waiting".
    pub waiting_on: u32,
    /// Threads touched within the last 7 days.
    pub active_threads: u32,
    /// Actions completed within the last 7 days.
    pub momentum: u32,
    pub histogram: CompletionHistogram,
}

/// Daily completion counts with their 2–10 bar heights.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionHistogram {
    /// Completions per day, index 0 = six days ago, index 6 = today.
    pub counts: [u32; HISTOGRAM_BINS],
    /// Visual bar heights on the fixed 2–10 scale.
    pub bars: [u8; HISTOGRAM_BINS],
}

/// Computes all derived analytics for one document.
pub fn compute(doc: &Document, now: EpochMillis) -> Analytics {
    let open_loops = doc.next_actions.iter().filter(|a| !a.done).count() as u32;
    let waiting_on = doc
        .next_actions
        .iter()
        .filter(|a| mentions_waiting(a))
        .count() as u32;
    let active_threads = doc
        .threads
        .iter()
        .filter(|t| within_recent_window(now, t.updated_at))
        .count() as u32;
    let momentum = doc
        .next_actions
        .iter()
        .filter(|a| {
            a.done
                && a.completed_at
                    .is_some_and(|at| within_recent_window(now, at))
        })
        .count() as u32;

    Analytics {
        open_loops,
        waiting_on,
        active_threads,
        momentum,
        histogram: completion_histogram(doc, now),
    }
}

/// Buckets completions into the trailing 7 days.
pub fn completion_histogram(doc: &Document, now: EpochMillis) -> CompletionHistogram {
    let mut counts = [0_u32; HISTOGRAM_BINS];
    let today = start_of_day(now);

    for action in &doc.next_actions {
        let Some(completed_at) = action.completed_at else {
            continue;
        };
        let days_ago = (today - start_of_day(completed_at)) / DAY_MS;
        let bin = 6 - days_ago;
        if (0..HISTOGRAM_BINS as i64).contains(&bin) {
            counts[bin as usize] += 1;
        }
    }

    CompletionHistogram {
        bars: bar_heights(&counts),
        counts,
    }
}

fn mentions_waiting(action: &Action) -> bool {
    WAITING_RE.is_match(&action.text) || WAITING_RE.is_match(&action.domain)
}

fn within_recent_window(now: EpochMillis, at: EpochMillis) -> bool {
    (0..RECENT_WINDOW_MS).contains(&(now - at))
}

/// Floors an epoch-ms timestamp to its UTC day boundary.
fn start_of_day(at: EpochMillis) -> EpochMillis {
    at.div_euclid(DAY_MS) * DAY_MS
}

/// Scales counts to the fixed 2–10 bar range the momentum card renders.
fn bar_heights(counts: &[u32; HISTOGRAM_BINS]) -> [u8; HISTOGRAM_BINS] {
    let max = counts.iter().copied().max().unwrap_or(0);
    if max == 0 {
        return [2; HISTOGRAM_BINS];
    }
    counts.map(|count| {
        let scaled = (f64::from(count) / f64::from(max) * 8.0).round() as i64 + 2;
        scaled.clamp(2, 10) as u8
    })
}

#[cfg(test)]
mod tests {
    use super::{bar_heights, start_of_day, DAY_MS};

    #[test]
    fn day_floor_handles_negative_epochs() {
        assert_eq!(start_of_day(0), 0);
        assert_eq!(start_of_day(DAY_MS - 1), 0);
        assert_eq!(start_of_day(-1), -DAY_MS);
    }

    #[test]
    fn bars_stay_flat_without_completions() {
        assert_eq!(bar_heights(&[0; 7]), [2; 7]);
    }

    #[test]
    fn bars_scale_to_the_busiest_day() {
        let bars = bar_heights(&[0, 0, 0, 0, 1, 0, 3]);
        assert_eq!(bars[6], 10);
        assert_eq!(bars[4], 5);
        assert_eq!(bars[0], 2);
    }
}
