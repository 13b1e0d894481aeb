//! Core domain logic for the task board.
//! This crate is the single source of truth for board invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod search;
pub mod service;
pub mod store;

pub use config::{resolve_db_path, DB_PATH_ENV};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::board::{Board, BoardIntegrityError, ColumnMove, TaskMove, TaskSlot};
pub use model::column::{Column, ColumnId, NEW_COLUMN_TITLE};
pub use model::prefs::{PriorityFilter, UiPrefs};
pub use model::task::{Priority, Task, TaskDraft, TaskId, TaskPatch};
pub use search::filter::{column_counts, visible_tasks, ColumnCounts};
pub use service::board_service::BoardService;
pub use service::prefs_service::PrefsService;
pub use store::board_store::BOARD_STORAGE_KEY;
pub use store::kv::{SqliteStateStore, StateStore};
pub use store::prefs_store::PREFS_STORAGE_KEY;
pub use store::{StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
