//! Task search and filter entry points.
//!
//! # Responsibility
//! - Decide which tasks of a column are visible for the current UI prefs.
//! - Keep match rules inside core so every shell filters identically.

pub mod filter;
