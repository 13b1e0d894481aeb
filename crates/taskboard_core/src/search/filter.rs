//! In-memory task filtering by search text and priority.
//!
//! # Invariants
//! - Visible tasks keep the column's display order.
//! - An empty search term matches every task.
//! - Matching is case-insensitive over title and description only.

use crate::model::board::Board;
use crate::model::prefs::{PriorityFilter, UiPrefs};
use crate::model::task::Task;

/// Visible and total task counts for one column header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnCounts {
    pub visible: usize,
    pub total: usize,
}

/// Returns whether `task` passes both the search term and the priority filter.
pub fn task_matches(task: &Task, search_term: &str, filter: PriorityFilter) -> bool {
    filter.matches(task.priority) && matches_search(task, search_term)
}

/// Returns the tasks of `column_id` visible under `prefs`, in column order.
///
/// Unknown columns yield an empty list; dangling task ids are skipped.
pub fn visible_tasks<'b>(board: &'b Board, column_id: &str, prefs: &UiPrefs) -> Vec<&'b Task> {
    let Some(column) = board.columns.get(column_id) else {
        return Vec::new();
    };

    column
        .task_ids
        .iter()
        .filter_map(|task_id| board.tasks.get(task_id))
        .filter(|task| task_matches(task, &prefs.search_term, prefs.filter_priority))
        .collect()
}

/// Returns visible/total counts for `column_id`, or `None` for unknown columns.
pub fn column_counts(board: &Board, column_id: &str, prefs: &UiPrefs) -> Option<ColumnCounts> {
    let column = board.columns.get(column_id)?;
    Some(ColumnCounts {
        visible: visible_tasks(board, column_id, prefs).len(),
        total: column.task_ids.len(),
    })
}

fn matches_search(task: &Task, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    let needle = search_term.to_lowercase();
    task.title.to_lowercase().contains(&needle) || task.description.to_lowercase().contains(&needle)
}
