//! Board use-case service.
//!
//! # Responsibility
//! - Expose the eight board operations to UI/FFI callers.
//! - Write the board blob after each operation that changed state.
//!
//! # Invariants
//! - Invalid references are no-ops and never surface as errors; only
//!   storage failures do.
//! - The in-memory board always equals the last successfully persisted
//!   board (or the loaded one); a failed save changes nothing.

use crate::model::board::{Board, ColumnMove, TaskMove};
use crate::model::column::ColumnId;
use crate::model::task::{TaskDraft, TaskId, TaskPatch};
use crate::store::board_store::{load_board_or_seed, save_board};
use crate::store::kv::StateStore;
use crate::store::StoreResult;
use chrono::Utc;
use log::{error, info};

/// Board state container bound to a store.
pub struct BoardService<S: StateStore> {
    store: S,
    board: Board,
}

impl<S: StateStore> BoardService<S> {
    /// Loads the persisted board, or the seeded board on first launch.
    ///
    /// The seed board is not written until the first mutation.
    pub fn load(store: S) -> StoreResult<Self> {
        let board = load_board_or_seed(&store, Utc::now())?;
        Ok(Self { store, board })
    }

    /// Read-only view of the current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    /// Adds a task to the end of `column_id`.
    ///
    /// Returns `Ok(None)` when the column is unknown or the title is blank.
    pub fn add_task(&mut self, column_id: &str, draft: TaskDraft) -> StoreResult<Option<TaskId>> {
        self.apply("task_add", |board| {
            let task_id = board.add_task(column_id, draft);
            let changed = task_id.is_some();
            (task_id, changed)
        })
    }

    pub fn update_task(&mut self, task_id: &str, patch: TaskPatch) -> StoreResult<bool> {
        self.apply_flag("task_update", |board| board.update_task(task_id, patch))
    }

    pub fn delete_task(&mut self, task_id: &str) -> StoreResult<bool> {
        self.apply_flag("task_delete", |board| board.delete_task(task_id))
    }

    /// Appends a "New Column" and returns its id.
    pub fn add_column(&mut self) -> StoreResult<ColumnId> {
        self.apply("column_add", |board| (board.add_column(), true))
    }

    pub fn rename_column(&mut self, column_id: &str, title: &str) -> StoreResult<bool> {
        self.apply_flag("column_rename", |board| board.rename_column(column_id, title))
    }

    /// Deletes a column and every task it owns.
    pub fn delete_column(&mut self, column_id: &str) -> StoreResult<bool> {
        self.apply_flag("column_delete", |board| board.delete_column(column_id))
    }

    pub fn move_task(&mut self, movement: &TaskMove) -> StoreResult<bool> {
        self.apply_flag("task_move", |board| board.move_task(movement))
    }

    pub fn move_column(&mut self, movement: &ColumnMove) -> StoreResult<bool> {
        self.apply_flag("column_move", |board| board.move_column(movement))
    }

    fn apply_flag(
        &mut self,
        event: &str,
        op: impl FnOnce(&mut Board) -> bool,
    ) -> StoreResult<bool> {
        self.apply(event, |board| {
            let changed = op(board);
            (changed, changed)
        })
    }

    /// Runs `op` on a copy of the board and keeps the copy only once it is
    /// saved. A failed save leaves the in-memory board untouched.
    fn apply<T>(
        &mut self,
        event: &str,
        op: impl FnOnce(&mut Board) -> (T, bool),
    ) -> StoreResult<T> {
        let mut next = self.board.clone();
        let (value, changed) = op(&mut next);
        if !changed {
            info!("event={event} module=board status=ok changed=false");
            return Ok(value);
        }

        match save_board(&self.store, &next) {
            Ok(()) => {
                info!(
                    "event={event} module=board status=ok changed=true columns={} tasks={}",
                    next.columns.len(),
                    next.tasks.len()
                );
                self.board = next;
                Ok(value)
            }
            Err(err) => {
                error!("event={event} module=board status=error error_code=save_failed error={err}");
                Err(err)
            }
        }
    }
}
