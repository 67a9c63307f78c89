use occono_core::service::analytics::{compute, completion_histogram, DAY_MS, RECENT_WINDOW_MS};
use occono_core::service::view::{visible_actions, visible_threads};
use occono_core::{Action, ActionsFilter, Document};

const NOW: i64 = 1_700_000_000_000;

fn action(id: &str, text: &str, done_at: Option<i64>) -> Action {
    Action {
        id: id.to_string(),
        text: text.to_string(),
        done: done_at.is_some(),
        domain: String::new(),
        created_at: NOW - DAY_MS,
        updated_at: done_at.unwrap_or(NOW - DAY_MS),
        completed_at: done_at,
    }
}

#[test]
fn open_loops_counts_undone_actions() {
    let mut doc = Document::defaults(NOW);
    doc.next_actions = vec![
        action("a", "open one", None),
        action("b", "open two", None),
        action("c", "closed", Some(NOW - 1_000)),
    ];
    assert_eq!(compute(&doc, NOW).open_loops, 2);
}

#[test]
fn waiting_on_matches_text_or_domain_case_insensitively() {
    let mut doc = Document::defaults(NOW);
    doc.next_actions = vec![
        action("a", "Waiting on plumber quote", None),
        action("b", "call the bank", None),
        {
            let mut tagged = action("c", "chase invoice", None);
            tagged.domain = "waiting/external".to_string();
            tagged
        },
    ];
    assert_eq!(compute(&doc, NOW).waiting_on, 2);
}

#[test]
fn active_threads_counts_recent_touches_only() {
    let mut doc = Document::defaults(NOW);
    for (i, thread) in doc.threads.iter_mut().enumerate() {
        thread.updated_at = NOW - (i as i64) * 2 * DAY_MS;
    }
    // Touched 0, 2, 4, 6, 8, 10 days ago; four fall inside the window.
    assert_eq!(compute(&doc, NOW).active_threads, 4);
    assert_eq!(RECENT_WINDOW_MS, 7 * DAY_MS);
}

#[test]
fn momentum_counts_completions_inside_seven_days() {
    let mut doc = Document::defaults(NOW);
    doc.next_actions = vec![
        action("a", "fresh win", Some(NOW - 1_000)),
        action("b", "recent win", Some(NOW - 6 * DAY_MS)),
        action("c", "old win", Some(NOW - 8 * DAY_MS)),
        action("d", "still open", None),
    ];
    assert_eq!(compute(&doc, NOW).momentum, 2);
}

#[test]
fn histogram_buckets_completions_by_day() {
    let mut doc = Document::defaults(NOW);
    doc.next_actions = vec![
        action("a", "today one", Some(NOW - 1_000)),
        action("b", "today two", Some(NOW - 2_000)),
        action("c", "today three", Some(NOW - 3_000)),
        action("d", "two days back", Some(NOW - 2 * DAY_MS)),
        action("e", "ancient", Some(NOW - 30 * DAY_MS)),
        action("f", "open", None),
    ];

    let histogram = completion_histogram(&doc, NOW);
    assert_eq!(histogram.counts, [0, 0, 0, 0, 1, 0, 3]);
    assert_eq!(histogram.bars[6], 10);
    assert_eq!(histogram.bars[4], 5);
    assert_eq!(histogram.bars[0], 2);
}

#[test]
fn histogram_is_flat_without_completions() {
    let doc = Document::defaults(NOW);
    let histogram = completion_histogram(&doc, NOW);
    assert_eq!(histogram.counts, [0; 7]);
    assert_eq!(histogram.bars, [2; 7]);
}

#[test]
fn open_filter_hides_done_actions() {
    let mut doc = Document::defaults(NOW);
    doc.next_actions = vec![
        action("a", "open item", None),
        action("b", "done item", Some(NOW - 1_000)),
    ];
    doc.ui.actions_filter = ActionsFilter::Open;
    let shown = visible_actions(&doc);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, "a");

    doc.ui.actions_filter = ActionsFilter::Done;
    let shown = visible_actions(&doc);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, "b");

    doc.ui.actions_filter = ActionsFilter::All;
    assert_eq!(visible_actions(&doc).len(), 2);
}

#[test]
fn search_matches_text_domain_and_status_label() {
    let mut doc = Document::defaults(NOW);
    doc.next_actions = vec![
        action("a", "Water the garden", None),
        action("b", "file receipts", Some(NOW - 1_000)),
        {
            let mut tagged = action("c", "renew policy", None);
            tagged.domain = "insurance".to_string();
            tagged
        },
    ];
    doc.ui.actions_filter = ActionsFilter::All;

    doc.ui.search = "WATER".to_string();
    assert_eq!(visible_actions(&doc).len(), 1);

    doc.ui.search = "insurance".to_string();
    let shown = visible_actions(&doc);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, "c");

    // The open/done status label is searchable, like the original UI.
    doc.ui.search = "done".to_string();
    let shown = visible_actions(&doc);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, "b");
}

#[test]
fn lists_sort_by_most_recent_touch_first() {
    let mut doc = Document::defaults(NOW);
    doc.next_actions = vec![
        action("old", "old touch", None),
        action("new", "new touch", None),
        action("mid", "mid touch", None),
    ];
    doc.next_actions[0].updated_at = NOW - 3_000;
    doc.next_actions[1].updated_at = NOW - 1_000;
    doc.next_actions[2].updated_at = NOW - 2_000;

    let visible = visible_actions(&doc);
    let order: Vec<&str> = visible.iter().map(|a| a.id.as_str()).collect();
    assert_eq!(order, ["new", "mid", "old"]);
}

#[test]
fn thread_search_covers_title_and_note() {
    let mut doc = Document::defaults(NOW);
    doc.ui.search = "jellyfin".to_string();
    let shown = visible_threads(&doc);
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].id, "t_media");
}
