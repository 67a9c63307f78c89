//! Terminal consumer for the dashboard state engine.
//!
//! # Responsibility
//! - Drive the core store through the same command surface a UI would use.
//! - Keep output deterministic and line-oriented for quick sanity checks.

use occono_core::service::analytics;
use occono_core::service::view;
use occono_core::store::{open_store, SqliteStateSlot};
use occono_core::{export_file_name, format_hms, now_ms, Command, DashboardService};
use std::path::PathBuf;

const DB_FILE_NAME: &str = "occono_done.sqlite3";

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(message) = run(&args) {
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let conn = open_store(resolve_db_path()).map_err(|err| err.to_string())?;
    let slot = SqliteStateSlot::new(&conn);
    let now = now_ms();
    let mut service = DashboardService::open(slot, now).map_err(|err| err.to_string())?;

    match args.first().map(String::as_str) {
        None | Some("summary") => {
            print_summary(&service);
            Ok(())
        }
        Some("add-action") => {
            let text = args.get(1).ok_or("usage: add-action <text> [domain]")?;
            let domain = args.get(2).cloned().unwrap_or_default();
            let command = Command::AddAction {
                text: text.clone(),
                domain,
            };
            service
                .apply(&command, now_ms())
                .map_err(|err| err.to_string())?;
            println!("added action");
            Ok(())
        }
        Some("toggle") => {
            let id = args.get(1).ok_or("usage: toggle <action-id>")?;
            let command = Command::ToggleAction { id: id.clone() };
            service
                .apply(&command, now_ms())
                .map_err(|err| err.to_string())?;
            println!("toggled {id}");
            Ok(())
        }
        Some("export") => {
            let exported_at = chrono::Utc::now();
            let envelope = service.export(exported_at);
            let name = export_file_name(exported_at.date_naive());
            let body = serde_json::to_string_pretty(&envelope).map_err(|err| err.to_string())?;
            std::fs::write(&name, body).map_err(|err| err.to_string())?;
            println!("exported to {name}");
            Ok(())
        }
        Some("import") => {
            let path = args.get(1).ok_or("usage: import <file.json>")?;
            let text = std::fs::read_to_string(path).map_err(|err| err.to_string())?;
            service
                .import(&text, now_ms())
                .map_err(|err| err.to_string())?;
            println!("imported {path}");
            Ok(())
        }
        Some(other) => Err(format!(
            "unknown command `{other}`; expected summary|add-action|toggle|export|import"
        )),
    }
}

fn print_summary<S: occono_core::StateSlot>(service: &DashboardService<S>) {
    let doc = service.document();
    let stats = analytics::compute(doc, now_ms());

    println!("occono_done version={}", occono_core::core_version());
    println!(
        "kpis open_loops={} waiting_on={} active_threads={} momentum={}",
        stats.open_loops, stats.waiting_on, stats.active_threads, stats.momentum
    );
    println!(
        "timer running={} elapsed={}",
        doc.timer.running,
        format_hms(doc.timer.seconds)
    );

    for action in view::visible_actions(doc) {
        let mark = if action.done { "x" } else { " " };
        println!("action [{mark}] {} {}", action.id, action.text);
    }
    for thread in view::visible_threads(doc) {
        println!("thread {} {}", thread.id, thread.title);
    }
    for reminder in &doc.reminders {
        println!(
            "reminder {} {} ({})",
            reminder.id,
            reminder.title,
            reminder.status.as_str()
        );
    }
}

fn resolve_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var("OCCONO_DB_PATH") {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(DB_FILE_NAME)
}
