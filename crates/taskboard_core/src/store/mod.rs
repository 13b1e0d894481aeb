//! Blob persistence over a key/value table.
//!
//! # Responsibility
//! - Mirror browser local storage: string values under fixed string keys.
//! - Encode/decode the board and UI preference blobs as JSON.
//!
//! # Invariants
//! - Board and prefs are stored independently under `BOARD_STORAGE_KEY` and
//!   `PREFS_STORAGE_KEY`.
//! - A missing key means "use defaults"; a present but malformed value is an
//!   error, never silently replaced.

use crate::db::DbError;
use crate::model::board::BoardIntegrityError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod board_store;
pub mod kv;
pub mod prefs_store;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for blob reads, writes and decoding.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    /// Stored JSON cannot be decoded into the expected shape.
    InvalidData { key: String, message: String },
    /// Stored board decodes but breaks a referential invariant.
    Integrity(BoardIntegrityError),
    /// In-memory state cannot be encoded.
    Encode(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData { key, message } => {
                write!(f, "invalid persisted value under `{key}`: {message}")
            }
            Self::Integrity(err) => write!(f, "persisted board is inconsistent: {err}"),
            Self::Encode(err) => write!(f, "failed to encode state: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData { .. } => None,
            Self::Integrity(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<BoardIntegrityError> for StoreError {
    fn from(value: BoardIntegrityError) -> Self {
        Self::Integrity(value)
    }
}
