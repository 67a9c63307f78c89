use occono_core::service::command::{
    add_action, add_reminder, add_thread, cycle_actions_filter, delete_action, dispatch,
    reset_timer, set_active_view, set_scratchpad, set_search, set_timer_running, start_reminder,
    tick_timer, toggle_action, touch_thread, Command,
};
use occono_core::{ActionsFilter, ActiveView, Document, ReminderStatus};

const NOW: i64 = 1_700_000_000_000;
const LATER: i64 = NOW + 60_000;

#[test]
fn toggle_sets_and_clears_completed_at() {
    let doc = Document::defaults(NOW);
    let id = doc.next_actions[0].id.clone();

    let done = toggle_action(&doc, &id, LATER);
    let action = done.next_actions.iter().find(|a| a.id == id).unwrap();
    assert!(action.done);
    assert_eq!(action.completed_at, Some(LATER));
    assert_eq!(action.updated_at, LATER);

    let reopened = toggle_action(&done, &id, LATER + 1);
    let action = reopened.next_actions.iter().find(|a| a.id == id).unwrap();
    assert!(!action.done);
    assert_eq!(action.completed_at, None);
    assert_eq!(action.updated_at, LATER + 1);
}

#[test]
fn toggle_does_not_mutate_the_input_document() {
    let doc = Document::defaults(NOW);
    let id = doc.next_actions[0].id.clone();
    let _ = toggle_action(&doc, &id, LATER);
    assert!(!doc.next_actions[0].done);
    assert_eq!(doc.next_actions[0].updated_at, NOW);
}

#[test]
fn mutations_on_missing_ids_are_noops() {
    let doc = Document::defaults(NOW);
    assert_eq!(toggle_action(&doc, "ghost", LATER), doc);
    assert_eq!(touch_thread(&doc, "ghost", LATER), doc);
    assert_eq!(start_reminder(&doc, "ghost", LATER), doc);
    let (after_delete, removed) = delete_action(&doc, "ghost");
    assert_eq!(after_delete, doc);
    assert!(removed.is_none());
}

#[test]
fn add_action_prepends_and_caps_at_twelve() {
    let mut doc = Document::defaults(NOW);
    for i in 0..20 {
        doc = add_action(&doc, &format!("task {i}"), "", NOW + i);
    }
    assert_eq!(doc.next_actions.len(), 12);
    assert_eq!(doc.next_actions[0].text, "task 19");
    assert_eq!(doc.next_actions[11].text, "task 8");
}

#[test]
fn new_actions_start_open_with_fresh_ids() {
    let doc = Document::defaults(NOW);
    let next = add_action(&doc, "file taxes", "money", LATER);
    let added = &next.next_actions[0];
    assert!(!added.done);
    assert_eq!(added.completed_at, None);
    assert_eq!(added.domain, "money");
    assert_eq!(added.created_at, LATER);
    assert!(doc.next_actions.iter().all(|a| a.id != added.id));
}

#[test]
fn add_thread_and_reminder_cap_their_lists() {
    let mut doc = Document::defaults(NOW);
    for i in 0..15 {
        doc = add_thread(&doc, &format!("thread {i}"), "", NOW + i);
        doc = add_reminder(&doc, &format!("reminder {i}"), "soon", NOW + i);
    }
    assert_eq!(doc.threads.len(), 12);
    assert_eq!(doc.reminders.len(), 8);
    assert_eq!(doc.threads[0].title, "thread 14");
    assert_eq!(doc.reminders[0].title, "reminder 14");
}

#[test]
fn delete_returns_record_and_origin_index() {
    let doc = Document::defaults(NOW);
    let target = doc.next_actions[2].clone();
    let (next, removed) = delete_action(&doc, &target.id);
    let (record, index) = removed.unwrap();
    assert_eq!(record, target);
    assert_eq!(index, 2);
    assert_eq!(next.next_actions.len(), doc.next_actions.len() - 1);
    assert!(next.next_actions.iter().all(|a| a.id != target.id));
}

#[test]
fn touch_thread_bumps_only_recency() {
    let doc = Document::defaults(NOW);
    let id = doc.threads[3].id.clone();
    let next = touch_thread(&doc, &id, LATER);
    let thread = next.threads.iter().find(|t| t.id == id).unwrap();
    assert_eq!(thread.updated_at, LATER);
    assert_eq!(thread.created_at, NOW);
    assert_eq!(thread.title, doc.threads[3].title);
}

#[test]
fn start_reminder_stamps_started_at_once_and_starts_the_timer() {
    let doc = Document::defaults(NOW);
    let id = doc.reminders[0].id.clone();

    let started = start_reminder(&doc, &id, LATER);
    let reminder = &started.reminders[0];
    assert_eq!(reminder.status, ReminderStatus::InProgress);
    assert_eq!(reminder.started_at, Some(LATER));
    assert!(started.timer.running);
    assert_eq!(started.focus_now.current, reminder.title);

    // Re-starting does not reset the clock.
    let restarted = start_reminder(&started, &id, LATER + 5_000);
    assert_eq!(restarted.reminders[0].started_at, Some(LATER));
    assert_eq!(restarted.reminders[0].updated_at, LATER + 5_000);
}

#[test]
fn timer_commands_run_the_stopwatch() {
    let doc = Document::defaults(NOW);
    let mut running = set_timer_running(&doc, true);
    assert!(running.timer.running);

    for _ in 0..3 {
        running = tick_timer(&running);
    }
    assert_eq!(running.timer.seconds, 3);

    let reset = reset_timer(&running);
    assert!(!reset.timer.running);
    assert_eq!(reset.timer.seconds, 0);
}

#[test]
fn filter_cycles_back_to_open_after_three_steps() {
    let doc = Document::defaults(NOW);
    assert_eq!(doc.ui.actions_filter, ActionsFilter::Open);
    let one = cycle_actions_filter(&doc);
    assert_eq!(one.ui.actions_filter, ActionsFilter::Done);
    let two = cycle_actions_filter(&one);
    assert_eq!(two.ui.actions_filter, ActionsFilter::All);
    let three = cycle_actions_filter(&two);
    assert_eq!(three.ui.actions_filter, ActionsFilter::Open);
}

#[test]
fn ui_setters_update_prefs() {
    let doc = Document::defaults(NOW);
    let searched = set_search(&doc, "walk");
    assert_eq!(searched.ui.search, "walk");
    let viewed = set_active_view(&searched, ActiveView::Analytics);
    assert_eq!(viewed.ui.active_view, ActiveView::Analytics);
    let scribbled = set_scratchpad(&viewed, "brain dump");
    assert_eq!(scribbled.scratchpad.text, "brain dump");
}

#[test]
fn dispatch_routes_commands_and_reports_removals() {
    let doc = Document::defaults(NOW);
    let id = doc.next_actions[1].id.clone();

    let toggled = dispatch(&doc, &Command::ToggleAction { id: id.clone() }, LATER);
    assert!(toggled.removed.is_none());
    assert!(toggled.next.next_actions.iter().any(|a| a.id == id && a.done));

    let deleted = dispatch(&doc, &Command::DeleteAction { id: id.clone() }, LATER);
    let removed = deleted.removed.unwrap();
    assert_eq!(removed.kind(), "action");
    assert!(deleted.next.next_actions.iter().all(|a| a.id != id));
}
