use crate::id::TaskId;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use time::{Date, OffsetDateTime};

/// Urgency levels. Ordering is `Low < Medium < High` so priority sorting
/// can compare the enum directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Can wait.
    Low,
    /// Normal urgency.
    #[default]
    Medium,
    /// Needs attention first.
    High,
}

impl Priority {
    /// String representation used in persisted files and CLI flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseFieldError::Priority(s.to_owned())),
        }
    }
}

/// Closed set of task categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Job-related tasks.
    Work,
    /// Private errands.
    Personal,
    /// Groceries and purchases.
    Shopping,
    /// Appointments, exercise, medication.
    Health,
    /// Bills, taxes, budgeting.
    Finance,
    /// Everything else.
    #[default]
    Other,
}

impl Category {
    /// String representation used in persisted files and CLI flags.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Work => "work",
            Self::Personal => "personal",
            Self::Shopping => "shopping",
            Self::Health => "health",
            Self::Finance => "finance",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "work" => Ok(Self::Work),
            "personal" => Ok(Self::Personal),
            "shopping" => Ok(Self::Shopping),
            "health" => Ok(Self::Health),
            "finance" => Ok(Self::Finance),
            "other" => Ok(Self::Other),
            _ => Err(ParseFieldError::Category(s.to_owned())),
        }
    }
}

/// Error returned when a textual field value cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ParseFieldError {
    /// Unknown priority token.
    #[error("unknown priority '{0}' (expected low, medium, or high)")]
    Priority(String),
    /// Unknown category token.
    #[error("unknown category '{0}'")]
    Category(String),
}

/// A single unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, assigned once at creation.
    pub id: TaskId,
    /// Display title.
    pub title: String,
    /// Optional free-text body.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
    /// Creation timestamp, never changed after creation.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// Timestamp of the latest mutation (including completion toggles).
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Optional due date at day granularity.
    #[serde(default)]
    pub due_date: Option<Date>,
    /// Urgency level.
    #[serde(default)]
    pub priority: Priority,
    /// Category bucket.
    #[serde(default)]
    pub category: Category,
}

/// Caller-supplied fields for creating a task. The repository fills in the
/// id, timestamps, and the initial `completed = false`.
#[derive(Debug, Clone, Default)]
pub struct TaskDraft {
    /// Display title.
    pub title: String,
    /// Optional free-text body.
    pub description: Option<String>,
    /// Optional due date.
    pub due_date: Option<Date>,
    /// Urgency level.
    pub priority: Priority,
    /// Category bucket.
    pub category: Category,
}

/// Patch for an optional field that distinguishes "set" from "clear".
/// Absent patches leave the field unchanged.
#[derive(Debug, Clone)]
pub enum FieldPatch<T> {
    /// Overwrite with a new value.
    Set(T),
    /// Clear the field entirely.
    Clear,
}

/// Partial update payload applied by the repository.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    /// Overwrite the title.
    pub title: Option<String>,
    /// Patch applied to the description.
    pub description: Option<FieldPatch<String>>,
    /// Patch applied to the due date.
    pub due_date: Option<FieldPatch<Date>>,
    /// Overwrite the priority.
    pub priority: Option<Priority>,
    /// Overwrite the category.
    pub category: Option<Category>,
}

impl TaskPatch {
    /// Returns true when applying the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.priority.is_none()
            && self.category.is_none()
    }

    /// Apply the patch to a task in place. The caller is responsible for
    /// bumping `updated_at`; `id` and `created_at` are never touched.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        match &self.description {
            Some(FieldPatch::Set(text)) => task.description = Some(text.clone()),
            Some(FieldPatch::Clear) => task.description = None,
            None => {}
        }
        match &self.due_date {
            Some(FieldPatch::Set(date)) => task.due_date = Some(*date),
            Some(FieldPatch::Clear) => task.due_date = None,
            None => {}
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
    }
}
