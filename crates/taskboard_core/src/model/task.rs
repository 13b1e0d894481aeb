//! Task domain model.
//!
//! # Responsibility
//! - Define the task record stored in the board task map.
//! - Normalize user-entered fields (title, description, tags).
//!
//! # Invariants
//! - `id` and `created_at` never change after creation.
//! - `title` is never blank after normalization.
//! - `tags` holds trimmed, non-empty, unique values in entry order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable task identifier (`task-<uuid>` for generated tasks).
pub type TaskId = String;

const TASK_ID_PREFIX: &str = "task-";

/// Task urgency shown on cards and used by the priority filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// Returns the canonical storage representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses a case-insensitive priority label.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A unit of work owned by exactly one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Markdown source; rendering happens in the UI shell.
    pub description: String,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub tags: Vec<String>,
}

/// Caller-supplied fields for a new task.
///
/// `id` and `created_at` are assigned by the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub tags: Vec<String>,
}

impl TaskDraft {
    /// Creates a draft with empty description and no tags.
    pub fn new(title: impl Into<String>, priority: Priority) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            priority,
            tags: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Partial task update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
}

impl TaskPatch {
    /// Returns whether the patch carries no field at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.tags.is_none()
    }
}

impl Task {
    /// Builds a task from a draft using caller-provided identity and time.
    ///
    /// Returns `None` when the draft title is blank after trim.
    pub fn from_draft(id: TaskId, draft: TaskDraft, created_at: DateTime<Utc>) -> Option<Self> {
        let title = normalize_title(&draft.title)?;
        Some(Self {
            id,
            title,
            description: draft.description.trim().to_string(),
            priority: draft.priority,
            created_at,
            tags: normalize_tags(draft.tags),
        })
    }

    /// Merges a patch into this task.
    ///
    /// Returns `true` when any field actually changed. A blank patch title is
    /// ignored so a task can never lose its title.
    pub fn apply_patch(&mut self, patch: TaskPatch) -> bool {
        let mut changed = false;

        if let Some(title) = patch.title.as_deref().and_then(normalize_title) {
            if title != self.title {
                self.title = title;
                changed = true;
            }
        }
        if let Some(description) = patch.description {
            let description = description.trim().to_string();
            if description != self.description {
                self.description = description;
                changed = true;
            }
        }
        if let Some(priority) = patch.priority {
            if priority != self.priority {
                self.priority = priority;
                changed = true;
            }
        }
        if let Some(tags) = patch.tags {
            let tags = normalize_tags(tags);
            if tags != self.tags {
                self.tags = tags;
                changed = true;
            }
        }

        changed
    }
}

/// Generates a fresh task id.
pub fn new_task_id() -> TaskId {
    format!("{TASK_ID_PREFIX}{}", Uuid::new_v4())
}

/// Trims tags, drops blanks and keeps the first occurrence of duplicates.
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() || normalized.iter().any(|existing| existing == trimmed) {
            continue;
        }
        normalized.push(trimmed.to_string());
    }
    normalized
}

fn normalize_title(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{new_task_id, normalize_tags, Priority, Task, TaskDraft, TaskPatch};
    use chrono::Utc;

    fn sample_task() -> Task {
        Task::from_draft(
            "task-a".to_string(),
            TaskDraft::new("  Write docs  ", Priority::Low).with_description(" body "),
            Utc::now(),
        )
        .expect("draft with title should build")
    }

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!(Priority::parse(" HIGH "), Some(Priority::High));
        assert_eq!(Priority::parse("urgent"), None);
        assert_eq!(Priority::Medium.as_str(), "medium");
    }

    #[test]
    fn from_draft_trims_fields_and_rejects_blank_title() {
        let task = sample_task();
        assert_eq!(task.title, "Write docs");
        assert_eq!(task.description, "body");

        let blank = Task::from_draft(
            "task-b".to_string(),
            TaskDraft::new("   ", Priority::High),
            Utc::now(),
        );
        assert!(blank.is_none());
    }

    #[test]
    fn normalize_tags_drops_blanks_and_duplicates() {
        let tags = normalize_tags(vec![
            " ui ".to_string(),
            String::new(),
            "ui".to_string(),
            "design".to_string(),
        ]);
        assert_eq!(tags, vec!["ui".to_string(), "design".to_string()]);
    }

    #[test]
    fn apply_patch_ignores_blank_title_and_reports_change() {
        let mut task = sample_task();
        let unchanged = task.apply_patch(TaskPatch {
            title: Some("  ".to_string()),
            ..TaskPatch::default()
        });
        assert!(!unchanged);
        assert_eq!(task.title, "Write docs");

        let changed = task.apply_patch(TaskPatch {
            priority: Some(Priority::High),
            tags: Some(vec!["docs".to_string()]),
            ..TaskPatch::default()
        });
        assert!(changed);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.tags, vec!["docs".to_string()]);
    }

    #[test]
    fn serializes_with_camel_case_fields() {
        let json = serde_json::to_value(sample_task()).expect("task should serialize");
        assert!(json.get("createdAt").is_some());
        assert_eq!(json["priority"], "low");
    }

    #[test]
    fn generated_ids_are_prefixed_and_distinct() {
        let first = new_task_id();
        let second = new_task_id();
        assert!(first.starts_with("task-"));
        assert_ne!(first, second);
    }
}
