//! Runtime configuration resolved from the environment.
//!
//! # Invariants
//! - A blank `TASKBOARD_DB_PATH` is treated as unset.

use std::path::PathBuf;

/// Environment variable overriding the board database location.
pub const DB_PATH_ENV: &str = "TASKBOARD_DB_PATH";

/// File name used under the temp directory when no override is set.
pub const DEFAULT_DB_FILE_NAME: &str = "taskboard.sqlite3";

/// Resolves the board database path from `TASKBOARD_DB_PATH`.
pub fn resolve_db_path() -> PathBuf {
    db_path_from(std::env::var(DB_PATH_ENV).ok())
}

fn db_path_from(raw: Option<String>) -> PathBuf {
    match raw.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::{db_path_from, DEFAULT_DB_FILE_NAME};
    use std::path::PathBuf;

    #[test]
    fn explicit_path_wins_after_trim() {
        assert_eq!(
            db_path_from(Some("  /data/board.db ".to_string())),
            PathBuf::from("/data/board.db")
        );
    }

    #[test]
    fn blank_or_missing_falls_back_to_temp_dir() {
        let expected = std::env::temp_dir().join(DEFAULT_DB_FILE_NAME);
        assert_eq!(db_path_from(None), expected);
        assert_eq!(db_path_from(Some("   ".to_string())), expected);
    }
}
