//! Board blob encoding and persistence.

use crate::model::board::Board;
use crate::store::kv::StateStore;
use crate::store::{StoreError, StoreResult};
use chrono::{DateTime, Utc};
use log::{debug, error};

/// Fixed storage key of the board blob.
pub const BOARD_STORAGE_KEY: &str = "taskBoard";

/// Encodes a board into its persisted JSON form.
pub fn encode_board(board: &Board) -> StoreResult<String> {
    serde_json::to_string(board).map_err(StoreError::Encode)
}

/// Decodes and integrity-checks a persisted board.
pub fn decode_board(raw: &str) -> StoreResult<Board> {
    let board: Board = serde_json::from_str(raw).map_err(|err| StoreError::InvalidData {
        key: BOARD_STORAGE_KEY.to_string(),
        message: err.to_string(),
    })?;
    board.validate()?;
    Ok(board)
}

/// Loads the persisted board, or `None` when nothing was saved yet.
pub fn load_board(store: &impl StateStore) -> StoreResult<Option<Board>> {
    let Some(raw) = store.get_value(BOARD_STORAGE_KEY)? else {
        debug!("event=board_load module=store status=ok source=empty");
        return Ok(None);
    };

    match decode_board(&raw) {
        Ok(board) => {
            debug!(
                "event=board_load module=store status=ok source=stored columns={} tasks={}",
                board.columns.len(),
                board.tasks.len()
            );
            Ok(Some(board))
        }
        Err(err) => {
            error!("event=board_load module=store status=error error={err}");
            Err(err)
        }
    }
}

/// Loads the persisted board, falling back to the seeded first-launch board.
pub fn load_board_or_seed(store: &impl StateStore, now: DateTime<Utc>) -> StoreResult<Board> {
    Ok(load_board(store)?.unwrap_or_else(|| Board::seeded(now)))
}

/// Writes the whole board under `BOARD_STORAGE_KEY`.
pub fn save_board(store: &impl StateStore, board: &Board) -> StoreResult<()> {
    let encoded = encode_board(board)?;
    store.set_value(BOARD_STORAGE_KEY, &encoded)?;
    debug!(
        "event=board_save module=store status=ok bytes={}",
        encoded.len()
    );
    Ok(())
}
