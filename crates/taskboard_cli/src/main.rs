//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `taskboard_core` linkage without the UI shell.
//! - Print a summary of the board stored at `TASKBOARD_DB_PATH`.

use std::process::ExitCode;
use taskboard_core::db::open_db;
use taskboard_core::{resolve_db_path, BoardService, SqliteStateStore};

fn main() -> ExitCode {
    println!("taskboard_core ping={}", taskboard_core::ping());
    println!("taskboard_core version={}", taskboard_core::core_version());

    let db_path = resolve_db_path();
    let summary = open_db(&db_path)
        .map_err(|err| err.to_string())
        .and_then(|conn| {
            BoardService::load(SqliteStateStore::new(&conn))
                .map(BoardService::into_board)
                .map_err(|err| err.to_string())
        });

    match summary {
        Ok(board) => {
            println!("board path={}", db_path.display());
            for column in board.ordered_columns() {
                println!("column id={} tasks={}", column.id, column.task_ids.len());
            }
            println!(
                "board columns={} tasks={}",
                board.column_order.len(),
                board.tasks.len()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("board load failed path={} error={err}", db_path.display());
            ExitCode::FAILURE
        }
    }
}
