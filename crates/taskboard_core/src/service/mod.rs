//! Core use-case services.
//!
//! # Responsibility
//! - Pair in-memory state with a `StateStore`.
//! - Persist the affected blob synchronously after every state change.
//!
//! # Invariants
//! - Mutations that leave state untouched do not write.
//! - Service layer remains storage-agnostic.

pub mod board_service;
pub mod prefs_service;
