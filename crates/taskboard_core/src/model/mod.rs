//! Board domain model.
//!
//! # Responsibility
//! - Define tasks, columns and the board that references them by id.
//! - Own every state mutation the UI can trigger.
//!
//! # Invariants
//! - Columns reference tasks by id; they never contain task content.
//! - A task id appears in at most one column list at a time.

pub mod board;
pub mod column;
pub mod prefs;
pub mod task;
