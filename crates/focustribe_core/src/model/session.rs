//! Focus session record, creation input and patch.
//!
//! # Invariants
//! - `completed_at.is_some()` iff `status == Completed`.

use super::task::TaskId;
use super::validation::ValidationError;
use super::{double_option, required_text, Entity, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type SessionId = u64;

pub const DEFAULT_SESSION_MINUTES: u32 = 25;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    #[default]
    Active,
    Completed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusSession {
    pub id: SessionId,
    pub title: String,
    /// Minutes.
    pub duration: u32,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub status: SessionStatus,
    #[serde(default)]
    pub task_id: Option<TaskId>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for FocusSession {
    const KIND: EntityKind = EntityKind::Session;

    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewSession {
    pub title: String,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<SessionStatus>,
    #[serde(default)]
    pub task_id: Option<TaskId>,
}

impl NewSession {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: Option<SessionStatus>,
    #[serde(default, deserialize_with = "double_option")]
    pub task_id: Option<Option<TaskId>>,
}

impl FocusSession {
    pub fn from_input(
        id: SessionId,
        input: NewSession,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let title = required_text(&input.title, "title")?;
        let mut session = Self {
            id,
            title,
            duration: input.duration.unwrap_or(DEFAULT_SESSION_MINUTES),
            date: input.date.unwrap_or(now),
            status: SessionStatus::Active,
            task_id: input.task_id,
            completed_at: None,
            created_at: now,
            updated_at: now,
        };
        session.transition(input.status.unwrap_or_default(), now);
        Ok(session)
    }

    pub fn apply_patch(
        &mut self,
        patch: SessionPatch,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let title = patch
            .title
            .as_deref()
            .map(|title| required_text(title, "title"))
            .transpose()?;

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(task_id) = patch.task_id {
            self.task_id = task_id;
        }
        if let Some(status) = patch.status {
            self.transition(status, now);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Marks the session finished. Completing twice keeps the first stamp.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.transition(SessionStatus::Completed, now);
        self.updated_at = now;
    }

    /// Re-derives `completed_at` from `status` on a loaded record.
    /// Returns whether anything changed.
    pub fn reconcile(&mut self) -> bool {
        let expected = match self.status {
            SessionStatus::Completed => Some(self.completed_at.unwrap_or(self.updated_at)),
            SessionStatus::Active => None,
        };
        if self.completed_at == expected {
            return false;
        }
        self.completed_at = expected;
        true
    }

    fn transition(&mut self, status: SessionStatus, now: DateTime<Utc>) {
        self.completed_at = match status {
            SessionStatus::Completed => Some(self.completed_at.unwrap_or(now)),
            SessionStatus::Active => None,
        };
        self.status = status;
    }
}
