//! Task record, creation input and patch.
//!
//! # Invariants
//! - `completed == true` iff `status == Completed` iff `completed_at.is_some()`.
//! - `completed_at` is never written by callers; it is stamped on transition.
//! - Tags are trimmed, lowercased and deduplicated in first-seen order.

use super::tribe::TribeId;
use super::validation::ValidationError;
use super::{double_option, required_text, Entity, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TaskId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tribe_id: Option<TribeId>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub starred: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Open status restored when a toggled-complete task is toggled back.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reopen_status: Option<TaskStatus>,
}

impl Entity for Task {
    const KIND: EntityKind = EntityKind::Task;

    fn id(&self) -> u64 {
        self.id
    }
}

/// Fields accepted when creating a task. Only `title` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub tribe_id: Option<TribeId>,
    #[serde(default)]
    pub starred: Option<bool>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update for a task.
///
/// `completed_at` is intentionally absent: it is derived from the completion
/// transition. `due_date` and `tribe_id` use `Some(None)` to clear the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TaskPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    pub tribe_id: Option<Option<TribeId>>,
    #[serde(default)]
    pub starred: Option<bool>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}

impl Task {
    /// Builds a task from validated input with every optional field defaulted.
    pub fn from_input(
        id: TaskId,
        input: NewTask,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let title = required_text(&input.title, "title")?;
        let mut task = Self {
            id,
            title,
            description: input.description.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            status: TaskStatus::Pending,
            due_date: input.due_date,
            tribe_id: input.tribe_id,
            completed: false,
            starred: input.starred.unwrap_or(false),
            completed_at: None,
            created_at: now,
            updated_at: now,
            tags: normalize_tags(&input.tags),
            reopen_status: None,
        };
        task.transition(input.status.unwrap_or_default(), now);
        Ok(task)
    }

    /// Merges `patch` field by field, then re-derives the completion triple.
    ///
    /// Validation runs before any field is written, so a rejected patch leaves
    /// the task untouched.
    pub fn apply_patch(
        &mut self,
        patch: TaskPatch,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let title = patch
            .title
            .as_deref()
            .map(|title| required_text(title, "title"))
            .transpose()?;
        let target_status = match (patch.status, patch.completed) {
            (Some(status), Some(completed))
                if (status == TaskStatus::Completed) != completed =>
            {
                return Err(ValidationError::ConflictingCompletion);
            }
            (Some(status), _) => Some(status),
            (None, Some(true)) => Some(TaskStatus::Completed),
            (None, Some(false)) if self.completed => Some(self.reopened_status()),
            (None, Some(false)) | (None, None) => None,
        };

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(tribe_id) = patch.tribe_id {
            self.tribe_id = tribe_id;
        }
        if let Some(starred) = patch.starred {
            self.starred = starred;
        }
        if let Some(tags) = patch.tags {
            self.tags = normalize_tags(&tags);
        }
        if let Some(status) = target_status {
            self.transition(status, now);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Flips completion and keeps `status`/`completed_at` in step.
    ///
    /// Toggling twice restores the previous open status.
    pub fn toggle_completed(&mut self, now: DateTime<Utc>) {
        let next = if self.completed {
            self.reopened_status()
        } else {
            TaskStatus::Completed
        };
        self.transition(next, now);
        self.updated_at = now;
    }

    pub fn toggle_starred(&mut self, now: DateTime<Utc>) {
        self.starred = !self.starred;
        self.updated_at = now;
    }

    /// Returns whether the completion triple agrees with itself.
    pub fn is_consistent(&self) -> bool {
        let by_status = self.status == TaskStatus::Completed;
        self.completed == by_status && self.completed_at.is_some() == by_status
    }

    /// Repairs a loaded record whose completion triple disagrees, trusting `status`.
    ///
    /// Returns `true` when the record was changed.
    pub fn reconcile(&mut self) -> bool {
        if self.is_consistent() {
            return false;
        }
        let completed = self.status == TaskStatus::Completed;
        self.completed = completed;
        self.completed_at = if completed {
            Some(self.completed_at.unwrap_or(self.updated_at))
        } else {
            None
        };
        true
    }

    fn reopened_status(&self) -> TaskStatus {
        self.reopen_status.unwrap_or(TaskStatus::Pending)
    }

    fn transition(&mut self, status: TaskStatus, now: DateTime<Utc>) {
        if status == TaskStatus::Completed {
            if !self.completed {
                self.reopen_status = Some(self.status);
                self.completed_at = Some(now);
            }
            self.completed = true;
        } else {
            self.completed = false;
            self.completed_at = None;
            self.reopen_status = None;
        }
        self.status = status;
    }
}

/// Trims, lowercases and deduplicates tags, dropping blanks.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim().to_lowercase();
        if !tag.is_empty() && !normalized.contains(&tag) {
            normalized.push(tag);
        }
    }
    normalized
}
