//! Use-case layer over the dashboard document.
//!
//! # Responsibility
//! - Apply mutation intents as pure document transitions.
//! - Derive the analytics and list read models the UI renders.
//! - Keep transient concerns (undo window) out of the persisted document.
//!
//! # Invariants
//! - Mutations never write storage themselves; the facade persists after
//!   each applied command.
//! - Operations on missing ids are no-ops.

pub mod analytics;
pub mod command;
pub mod dashboard;
pub mod undo;
pub mod view;
