//! Board state container and its mutations.
//!
//! # Responsibility
//! - Hold the task map, column map and column order.
//! - Apply task/column CRUD and drag-and-drop reordering.
//!
//! # Invariants
//! - Every id in a column's `task_ids` exists in `tasks`.
//! - Every id in `column_order` exists in `columns`.
//! - A task id appears in at most one column list.
//! - Mutations never fail: invalid references leave the board untouched and
//!   report `false`/`None`.
//!
//! Reordering is always remove-then-insert, so destination indexes address
//! the list as it looks after the dragged item was taken out.

use crate::model::column::{new_column_id, Column, ColumnId, NEW_COLUMN_TITLE};
use crate::model::task::{new_task_id, Priority, Task, TaskDraft, TaskId, TaskPatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Whole board state persisted as one blob.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub tasks: BTreeMap<TaskId, Task>,
    pub columns: BTreeMap<ColumnId, Column>,
    pub column_order: Vec<ColumnId>,
}

/// One drop position: a column plus an index inside its task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSlot {
    pub column_id: ColumnId,
    pub index: usize,
}

impl TaskSlot {
    pub fn new(column_id: impl Into<ColumnId>, index: usize) -> Self {
        Self {
            column_id: column_id.into(),
            index,
        }
    }
}

/// Drag-and-drop result for a task card.
///
/// `destination = None` means the card was dropped outside any column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskMove {
    pub task_id: TaskId,
    pub source: TaskSlot,
    pub destination: Option<TaskSlot>,
}

/// Drag-and-drop result for a whole column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMove {
    pub column_id: ColumnId,
    pub source_index: usize,
    pub destination_index: Option<usize>,
}

/// First referential-integrity violation found by `Board::validate`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardIntegrityError {
    /// A column lists a task id that is missing from the task map.
    MissingTask { column_id: ColumnId, task_id: TaskId },
    /// The column order lists an id that is missing from the column map.
    MissingColumn(ColumnId),
    /// A task id is listed more than once across all columns.
    DuplicateTask(TaskId),
    /// A column id is listed more than once in the column order.
    DuplicateColumn(ColumnId),
    /// A task exists in the task map but no column lists it.
    OrphanTask(TaskId),
    /// A map key differs from the id stored inside the entry.
    IdMismatch { key: String, id: String },
}

impl Display for BoardIntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingTask { column_id, task_id } => {
                write!(f, "column {column_id} references missing task {task_id}")
            }
            Self::MissingColumn(id) => write!(f, "column order references missing column {id}"),
            Self::DuplicateTask(id) => write!(f, "task {id} is listed more than once"),
            Self::DuplicateColumn(id) => write!(f, "column {id} is listed more than once"),
            Self::OrphanTask(id) => write!(f, "task {id} is not owned by any column"),
            Self::IdMismatch { key, id } => {
                write!(f, "map key `{key}` does not match entry id `{id}`")
            }
        }
    }
}

impl Error for BoardIntegrityError {}

impl Board {
    /// Returns the board shown on first launch.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        let seed_tasks = [
            (
                "task-1",
                "Create project structure",
                "Set up the basic files and folders for the project",
                Priority::High,
                &["setup"][..],
            ),
            (
                "task-2",
                "Design UI components",
                "Create basic UI components for the application",
                Priority::Medium,
                &["design", "UI"][..],
            ),
            (
                "task-3",
                "Implement drag and drop",
                "Add drag and drop functionality to the task board",
                Priority::Low,
                &["feature"][..],
            ),
        ];

        let mut board = Self::default();
        for (id, title, description, priority, tags) in seed_tasks {
            board.tasks.insert(
                id.to_string(),
                Task {
                    id: id.to_string(),
                    title: title.to_string(),
                    description: description.to_string(),
                    priority,
                    created_at: now,
                    tags: tags.iter().map(|tag| (*tag).to_string()).collect(),
                },
            );
        }

        let seed_columns = [
            ("column-1", "To Do", &["task-1", "task-2"][..]),
            ("column-2", "In Progress", &["task-3"][..]),
            ("column-3", "Done", &[][..]),
        ];
        for (id, title, task_ids) in seed_columns {
            let mut column = Column::new(id, title);
            column.task_ids = task_ids.iter().map(|task| (*task).to_string()).collect();
            board.columns.insert(id.to_string(), column);
            board.column_order.push(id.to_string());
        }

        board
    }

    /// Iterates columns in display order, skipping dangling order entries.
    pub fn ordered_columns(&self) -> impl Iterator<Item = &Column> + '_ {
        self.column_order
            .iter()
            .filter_map(move |id| self.columns.get(id))
    }

    /// Returns the column currently owning `task_id`.
    pub fn owning_column(&self, task_id: &str) -> Option<&Column> {
        self.columns
            .values()
            .find(|column| column.position_of(task_id).is_some())
    }

    /// Appends a new task to the end of `column_id` with the current time.
    pub fn add_task(&mut self, column_id: &str, draft: TaskDraft) -> Option<TaskId> {
        self.add_task_at(column_id, draft, Utc::now())
    }

    /// Appends a new task to the end of `column_id`.
    ///
    /// Returns the generated id, or `None` when the column is unknown or the
    /// draft title is blank.
    pub fn add_task_at(
        &mut self,
        column_id: &str,
        draft: TaskDraft,
        created_at: DateTime<Utc>,
    ) -> Option<TaskId> {
        if !self.columns.contains_key(column_id) {
            return None;
        }

        let mut task_id = new_task_id();
        while self.tasks.contains_key(&task_id) {
            task_id = new_task_id();
        }

        let task = Task::from_draft(task_id.clone(), draft, created_at)?;
        self.tasks.insert(task_id.clone(), task);
        if let Some(column) = self.columns.get_mut(column_id) {
            column.task_ids.push(task_id.clone());
        }
        Some(task_id)
    }

    /// Merges `patch` into an existing task.
    pub fn update_task(&mut self, task_id: &str, patch: TaskPatch) -> bool {
        if patch.is_empty() {
            return false;
        }
        match self.tasks.get_mut(task_id) {
            Some(task) => task.apply_patch(patch),
            None => false,
        }
    }

    /// Removes a task from the task map and from every column listing it.
    pub fn delete_task(&mut self, task_id: &str) -> bool {
        let mut changed = self.tasks.remove(task_id).is_some();
        for column in self.columns.values_mut() {
            let before = column.task_ids.len();
            column.task_ids.retain(|id| id != task_id);
            changed |= column.task_ids.len() != before;
        }
        changed
    }

    /// Appends an empty column titled "New Column" and returns its id.
    pub fn add_column(&mut self) -> ColumnId {
        let mut column_id = new_column_id();
        while self.columns.contains_key(&column_id) {
            column_id = new_column_id();
        }

        self.columns.insert(
            column_id.clone(),
            Column::new(column_id.clone(), NEW_COLUMN_TITLE),
        );
        self.column_order.push(column_id.clone());
        column_id
    }

    /// Renames a column. Blank titles are ignored.
    pub fn rename_column(&mut self, column_id: &str, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            return false;
        }
        match self.columns.get_mut(column_id) {
            Some(column) if column.title != title => {
                column.title = title.to_string();
                true
            }
            _ => false,
        }
    }

    /// Deletes a column together with every task it owns.
    pub fn delete_column(&mut self, column_id: &str) -> bool {
        let Some(column) = self.columns.remove(column_id) else {
            return false;
        };
        for task_id in &column.task_ids {
            self.tasks.remove(task_id);
        }
        self.column_order.retain(|id| id != column_id);
        true
    }

    /// Applies a task drag-and-drop result.
    ///
    /// No-op when the card was dropped outside a column, dropped on its own
    /// slot, or when the source slot does not hold `task_id`. The destination
    /// index is clamped to the target list length.
    pub fn move_task(&mut self, movement: &TaskMove) -> bool {
        let Some(destination) = movement.destination.as_ref() else {
            return false;
        };
        let source = &movement.source;
        if source.column_id == destination.column_id && source.index == destination.index {
            return false;
        }
        if !self.columns.contains_key(&destination.column_id) {
            return false;
        }
        let Some(source_column) = self.columns.get(&source.column_id) else {
            return false;
        };
        if source_column.task_ids.get(source.index) != Some(&movement.task_id) {
            return false;
        }

        if source.column_id == destination.column_id {
            let Some(column) = self.columns.get_mut(&source.column_id) else {
                return false;
            };
            return reorder(&mut column.task_ids, source.index, destination.index);
        }

        if self
            .columns
            .get(&destination.column_id)
            .is_some_and(|column| column.position_of(&movement.task_id).is_some())
        {
            return false;
        }

        if let Some(column) = self.columns.get_mut(&source.column_id) {
            column.task_ids.remove(source.index);
        }
        if let Some(column) = self.columns.get_mut(&destination.column_id) {
            let index = destination.index.min(column.task_ids.len());
            column.task_ids.insert(index, movement.task_id.clone());
        }
        true
    }

    /// Applies a column drag-and-drop result on the column order.
    pub fn move_column(&mut self, movement: &ColumnMove) -> bool {
        let Some(destination_index) = movement.destination_index else {
            return false;
        };
        if movement.source_index == destination_index {
            return false;
        }
        if self.column_order.get(movement.source_index) != Some(&movement.column_id) {
            return false;
        }
        reorder(
            &mut self.column_order,
            movement.source_index,
            destination_index,
        )
    }

    /// Checks the referential invariants of the board, including that every
    /// task is owned by exactly one column.
    pub fn validate(&self) -> Result<(), BoardIntegrityError> {
        for (key, task) in &self.tasks {
            if *key != task.id {
                return Err(BoardIntegrityError::IdMismatch {
                    key: key.clone(),
                    id: task.id.clone(),
                });
            }
        }

        let mut seen_tasks: HashSet<&str> = HashSet::new();
        for (key, column) in &self.columns {
            if *key != column.id {
                return Err(BoardIntegrityError::IdMismatch {
                    key: key.clone(),
                    id: column.id.clone(),
                });
            }
            for task_id in &column.task_ids {
                if !self.tasks.contains_key(task_id) {
                    return Err(BoardIntegrityError::MissingTask {
                        column_id: column.id.clone(),
                        task_id: task_id.clone(),
                    });
                }
                if !seen_tasks.insert(task_id.as_str()) {
                    return Err(BoardIntegrityError::DuplicateTask(task_id.clone()));
                }
            }
        }

        if let Some(orphan) = self
            .tasks
            .keys()
            .find(|task_id| !seen_tasks.contains(task_id.as_str()))
        {
            return Err(BoardIntegrityError::OrphanTask(orphan.clone()));
        }

        let mut seen_columns: HashSet<&str> = HashSet::new();
        for column_id in &self.column_order {
            if !self.columns.contains_key(column_id) {
                return Err(BoardIntegrityError::MissingColumn(column_id.clone()));
            }
            if !seen_columns.insert(column_id.as_str()) {
                return Err(BoardIntegrityError::DuplicateColumn(column_id.clone()));
            }
        }

        Ok(())
    }
}

/// Remove-then-insert inside one list. Returns whether the order changed.
fn reorder<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() {
        return false;
    }
    let item = items.remove(from);
    let index = to.min(items.len());
    items.insert(index, item);
    index != from
}
