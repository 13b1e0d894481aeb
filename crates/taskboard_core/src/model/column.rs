//! Column domain model.

use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable column identifier (`column-<uuid>` for generated columns).
pub type ColumnId = String;

/// Title given to columns created through `Board::add_column`.
pub const NEW_COLUMN_TITLE: &str = "New Column";

const COLUMN_ID_PREFIX: &str = "column-";

/// Named, ordered bucket of task references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    /// Display order of the tasks owned by this column.
    pub task_ids: Vec<TaskId>,
}

impl Column {
    /// Creates an empty column.
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Returns the position of `task_id` in this column, if present.
    pub fn position_of(&self, task_id: &str) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }
}

/// Generates a fresh column id.
pub fn new_column_id() -> ColumnId {
    format!("{COLUMN_ID_PREFIX}{}", Uuid::new_v4())
}
