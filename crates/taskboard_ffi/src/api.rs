//! FFI use-case API for the board UI shell.
//!
//! # Responsibility
//! - Expose board and UI-preference operations to Dart via FRB.
//! - Keep error semantics simple: every call returns an envelope.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Each call runs load-mutate-save inside one immediate transaction, so
//!   concurrent callers never lose each other's writes.
//! - Board/prefs payloads are JSON in the persisted blob schema.

use log::warn;
use rusqlite::TransactionBehavior;
use std::path::PathBuf;
use std::sync::OnceLock;
use taskboard_core::db::open_db;
use taskboard_core::store::board_store::encode_board;
use taskboard_core::{
    column_counts, core_version as core_version_inner, init_logging as init_logging_inner,
    ping as ping_inner, resolve_db_path, visible_tasks, BoardService, ColumnMove, PrefsService,
    Priority, PriorityFilter, SqliteStateStore, StoreResult, TaskDraft, TaskMove, TaskPatch,
    TaskSlot, UiPrefs,
};

static BOARD_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Returns empty string on success and an error message on failure.
/// Safe to call repeatedly with the same `level + log_dir`.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result envelope for board mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    /// Whether the call completed without storage errors.
    pub ok: bool,
    /// Whether board state changed (`false` for no-op references).
    pub changed: bool,
    /// Created task/column id, when the call creates one.
    pub id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl BoardActionResponse {
    fn applied(changed: bool, id: Option<String>, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            changed,
            id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            changed: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Full board payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshotResponse {
    pub ok: bool,
    /// Board JSON (`tasks`, `columns`, `columnOrder`); empty on failure.
    pub board_json: String,
    pub message: String,
}

/// Visible task ids of one column under the persisted search/filter prefs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleTasksResponse {
    pub ok: bool,
    pub task_ids: Vec<String>,
    /// Number of tasks in the column before filtering.
    pub total: u32,
    pub message: String,
}

/// UI preference payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefsResponse {
    pub ok: bool,
    pub is_dark_mode: bool,
    pub search_term: String,
    /// One of `all|low|medium|high`.
    pub filter_priority: String,
    pub message: String,
}

impl PrefsResponse {
    fn from_prefs(prefs: &UiPrefs, message: impl Into<String>) -> Self {
        Self {
            ok: true,
            is_dark_mode: prefs.is_dark_mode,
            search_term: prefs.search_term.clone(),
            filter_priority: filter_label(prefs.filter_priority).to_string(),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            is_dark_mode: false,
            search_term: String::new(),
            filter_priority: filter_label(PriorityFilter::All).to_string(),
            message: message.into(),
        }
    }
}

/// Returns the current board, seeded on first launch.
#[flutter_rust_bridge::frb(sync)]
pub fn board_snapshot() -> BoardSnapshotResponse {
    let result = with_board_service(|service| encode_board(service.board()));
    match result {
        Ok(board_json) => BoardSnapshotResponse {
            ok: true,
            board_json,
            message: "Board loaded.".to_string(),
        },
        Err(err) => BoardSnapshotResponse {
            ok: false,
            board_json: String::new(),
            message: log_failure("board_snapshot", err),
        },
    }
}

/// Adds a task to the end of `column_id`.
///
/// `priority` is `low|medium|high`. Unknown column or blank title is a
/// no-op (`changed = false`).
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_task(
    column_id: String,
    title: String,
    description: String,
    priority: String,
    tags: Vec<String>,
) -> BoardActionResponse {
    let Some(priority) = Priority::parse(&priority) else {
        return BoardActionResponse::failure(format!("unsupported priority `{priority}`"));
    };
    let draft = TaskDraft::new(title, priority)
        .with_description(description)
        .with_tags(tags);

    match with_board_service(|service| service.add_task(&column_id, draft)) {
        Ok(Some(task_id)) => BoardActionResponse::applied(true, Some(task_id), "Task created."),
        Ok(None) => BoardActionResponse::applied(false, None, "Task not created."),
        Err(err) => BoardActionResponse::failure(log_failure("board_add_task", err)),
    }
}

/// Partially updates a task. `None` fields stay unchanged.
#[flutter_rust_bridge::frb(sync)]
pub fn board_update_task(
    task_id: String,
    title: Option<String>,
    description: Option<String>,
    priority: Option<String>,
    tags: Option<Vec<String>>,
) -> BoardActionResponse {
    let priority = match priority {
        Some(label) => match Priority::parse(&label) {
            Some(parsed) => Some(parsed),
            None => {
                return BoardActionResponse::failure(format!("unsupported priority `{label}`"));
            }
        },
        None => None,
    };
    let patch = TaskPatch {
        title,
        description,
        priority,
        tags,
    };

    run_board_action("board_update_task", "Task updated.", |service| {
        service.update_task(&task_id, patch)
    })
}

/// Deletes a task from the board and its column.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_task(task_id: String) -> BoardActionResponse {
    run_board_action("board_delete_task", "Task deleted.", |service| {
        service.delete_task(&task_id)
    })
}

/// Appends a "New Column" and returns its id.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_column() -> BoardActionResponse {
    match with_board_service(|service| service.add_column()) {
        Ok(column_id) => BoardActionResponse::applied(true, Some(column_id), "Column created."),
        Err(err) => BoardActionResponse::failure(log_failure("board_add_column", err)),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn board_rename_column(column_id: String, title: String) -> BoardActionResponse {
    run_board_action("board_rename_column", "Column renamed.", |service| {
        service.rename_column(&column_id, &title)
    })
}

/// Deletes a column and all of its tasks.
#[flutter_rust_bridge::frb(sync)]
pub fn board_delete_column(column_id: String) -> BoardActionResponse {
    run_board_action("board_delete_column", "Column deleted.", |service| {
        service.delete_column(&column_id)
    })
}

/// Applies a task drop. A missing destination column or index means the
/// card was dropped outside the board.
#[flutter_rust_bridge::frb(sync)]
pub fn board_move_task(
    task_id: String,
    source_column_id: String,
    source_index: u32,
    destination_column_id: Option<String>,
    destination_index: Option<u32>,
) -> BoardActionResponse {
    let destination = destination_column_id
        .zip(destination_index)
        .map(|(column_id, index)| TaskSlot::new(column_id, index as usize));
    let movement = TaskMove {
        task_id,
        source: TaskSlot::new(source_column_id, source_index as usize),
        destination,
    };

    run_board_action("board_move_task", "Task moved.", |service| {
        service.move_task(&movement)
    })
}

/// Applies a column drop on the column order.
#[flutter_rust_bridge::frb(sync)]
pub fn board_move_column(
    column_id: String,
    source_index: u32,
    destination_index: Option<u32>,
) -> BoardActionResponse {
    let movement = ColumnMove {
        column_id,
        source_index: source_index as usize,
        destination_index: destination_index.map(|index| index as usize),
    };

    run_board_action("board_move_column", "Column moved.", |service| {
        service.move_column(&movement)
    })
}

/// Lists the visible task ids of a column using persisted search/filter.
#[flutter_rust_bridge::frb(sync)]
pub fn board_visible_tasks(column_id: String) -> VisibleTasksResponse {
    let result = with_connection(|conn| {
        let board_service = BoardService::load(SqliteStateStore::new(conn))?;
        let prefs_service = PrefsService::load(SqliteStateStore::new(conn), false)?;
        let board = board_service.board();
        let prefs = prefs_service.prefs();

        let task_ids = visible_tasks(board, &column_id, prefs)
            .into_iter()
            .map(|task| task.id.clone())
            .collect::<Vec<_>>();
        let total = column_counts(board, &column_id, prefs).map_or(0, |counts| counts.total);
        Ok((task_ids, total))
    });

    match result {
        Ok((task_ids, total)) => VisibleTasksResponse {
            message: format!("{} of {total} task(s) visible.", task_ids.len()),
            ok: true,
            task_ids,
            total: u32::try_from(total).unwrap_or(u32::MAX),
        },
        Err(err) => VisibleTasksResponse {
            ok: false,
            task_ids: Vec::new(),
            total: 0,
            message: log_failure("board_visible_tasks", err),
        },
    }
}

/// Returns UI prefs; `prefers_dark` seeds dark mode on first launch.
#[flutter_rust_bridge::frb(sync)]
pub fn prefs_snapshot(prefers_dark: bool) -> PrefsResponse {
    run_prefs_action("prefs_snapshot", "Preferences loaded.", prefers_dark, |_| Ok(()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn prefs_toggle_dark_mode(prefers_dark: bool) -> PrefsResponse {
    run_prefs_action("prefs_toggle_dark_mode", "Dark mode toggled.", prefers_dark, |service| {
        service.toggle_dark_mode().map(|_| ())
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn prefs_set_search_term(term: String, prefers_dark: bool) -> PrefsResponse {
    run_prefs_action("prefs_set_search_term", "Search updated.", prefers_dark, |service| {
        service.set_search_term(term).map(|_| ())
    })
}

/// Sets the priority filter (`all|low|medium|high`).
#[flutter_rust_bridge::frb(sync)]
pub fn prefs_set_filter_priority(filter: String, prefers_dark: bool) -> PrefsResponse {
    let Some(parsed) = PriorityFilter::parse(&filter) else {
        return PrefsResponse::failure(format!("unsupported priority filter `{filter}`"));
    };
    run_prefs_action("prefs_set_filter_priority", "Filter updated.", prefers_dark, |service| {
        service.set_filter_priority(parsed).map(|_| ())
    })
}

fn run_board_action(
    op: &str,
    changed_message: &str,
    f: impl FnOnce(&mut BoardService<SqliteStateStore<'_>>) -> StoreResult<bool>,
) -> BoardActionResponse {
    match with_board_service(f) {
        Ok(true) => BoardActionResponse::applied(true, None, changed_message),
        Ok(false) => BoardActionResponse::applied(false, None, "Nothing changed."),
        Err(err) => BoardActionResponse::failure(log_failure(op, err)),
    }
}

fn run_prefs_action(
    op: &str,
    message: &str,
    prefers_dark: bool,
    f: impl FnOnce(&mut PrefsService<SqliteStateStore<'_>>) -> StoreResult<()>,
) -> PrefsResponse {
    let result = with_connection(|conn| {
        let mut service = PrefsService::load(SqliteStateStore::new(conn), prefers_dark)?;
        f(&mut service)?;
        Ok(service.prefs().clone())
    });
    match result {
        Ok(prefs) => PrefsResponse::from_prefs(&prefs, message),
        Err(err) => PrefsResponse::failure(log_failure(op, err)),
    }
}

fn with_board_service<T>(
    f: impl FnOnce(&mut BoardService<SqliteStateStore<'_>>) -> StoreResult<T>,
) -> Result<T, String> {
    with_connection(|conn| {
        let mut service = BoardService::load(SqliteStateStore::new(conn))?;
        f(&mut service)
    })
}

fn with_connection<T>(
    f: impl FnOnce(&rusqlite::Connection) -> StoreResult<T>,
) -> Result<T, String> {
    let db_path = resolve_board_db_path();
    let mut conn = open_db(&db_path).map_err(|err| format!("board DB open failed: {err}"))?;
    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(|err| format!("board DB transaction failed: {err}"))?;
    let value = f(&tx).map_err(|err| err.to_string())?;
    tx.commit()
        .map_err(|err| format!("board DB commit failed: {err}"))?;
    Ok(value)
}

fn resolve_board_db_path() -> PathBuf {
    if let Some(path) = thread_db_override() {
        return path;
    }
    BOARD_DB_PATH.get_or_init(resolve_db_path).clone()
}

#[cfg(test)]
fn thread_db_override() -> Option<PathBuf> {
    tests::THREAD_DB_PATH.with(|slot| slot.borrow().clone())
}

#[cfg(not(test))]
fn thread_db_override() -> Option<PathBuf> {
    None
}

fn log_failure(op: &str, err: String) -> String {
    warn!("event=ffi_call module=ffi status=error op={op} error={err}");
    format!("{op} failed: {err}")
}

fn filter_label(filter: PriorityFilter) -> &'static str {
    match filter {
        PriorityFilter::All => "all",
        PriorityFilter::Low => "low",
        PriorityFilter::Medium => "medium",
        PriorityFilter::High => "high",
    }
}
