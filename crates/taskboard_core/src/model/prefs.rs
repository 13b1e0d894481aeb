//! UI preference state persisted next to the board.

use crate::model::task::Priority;
use serde::{Deserialize, Serialize};

/// Priority filter applied to visible tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl PriorityFilter {
    /// Returns whether a task with `priority` passes this filter.
    pub fn matches(self, priority: Priority) -> bool {
        match self {
            Self::All => true,
            Self::Low => priority == Priority::Low,
            Self::Medium => priority == Priority::Medium,
            Self::High => priority == Priority::High,
        }
    }

    /// Parses a case-insensitive filter label (`all|low|medium|high`).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Some(Self::All),
            other => Priority::parse(other).map(Self::from),
        }
    }
}

impl From<Priority> for PriorityFilter {
    fn from(value: Priority) -> Self {
        match value {
            Priority::Low => Self::Low,
            Priority::Medium => Self::Medium,
            Priority::High => Self::High,
        }
    }
}

/// Dark mode, search text and priority filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPrefs {
    pub is_dark_mode: bool,
    pub search_term: String,
    pub filter_priority: PriorityFilter,
}

impl UiPrefs {
    /// Default preferences following the host's color-scheme preference.
    pub fn with_system_preference(prefers_dark: bool) -> Self {
        Self {
            is_dark_mode: prefers_dark,
            ..Self::default()
        }
    }

    /// Flips dark mode and returns the new value.
    pub fn toggle_dark_mode(&mut self) -> bool {
        self.is_dark_mode = !self.is_dark_mode;
        self.is_dark_mode
    }

    /// Stores the raw search text as typed.
    pub fn set_search_term(&mut self, term: impl Into<String>) -> bool {
        let term = term.into();
        if term == self.search_term {
            return false;
        }
        self.search_term = term;
        true
    }

    pub fn set_filter_priority(&mut self, filter: PriorityFilter) -> bool {
        if filter == self.filter_priority {
            return false;
        }
        self.filter_priority = filter;
        true
    }
}
