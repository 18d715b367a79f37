//! Tribe record, creation input and patch.
//!
//! # Invariants
//! - `members >= 1`: a tribe always keeps at least its creator.

use super::validation::ValidationError;
use super::{required_text, Entity, EntityKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type TribeId = u64;

pub const MIN_MEMBERS: u32 = 1;
pub const DEFAULT_TRIBE_COLOR: &str = "indigo";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TribeRole {
    #[default]
    Leader,
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tribe {
    pub id: TribeId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub members: u32,
    #[serde(default)]
    pub active_tasks: u32,
    #[serde(default)]
    pub active_today: u32,
    #[serde(default)]
    pub role: TribeRole,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Tribe {
    const KIND: EntityKind = EntityKind::Tribe;

    fn id(&self) -> u64 {
        self.id
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewTribe {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub role: Option<TribeRole>,
}

impl NewTribe {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TribePatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub members: Option<u32>,
    #[serde(default)]
    pub active_tasks: Option<u32>,
    #[serde(default)]
    pub active_today: Option<u32>,
    #[serde(default)]
    pub role: Option<TribeRole>,
}

impl Tribe {
    /// Builds a tribe whose creator is its only member.
    pub fn from_input(
        id: TribeId,
        input: NewTribe,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        let name = required_text(&input.name, "name")?;
        Ok(Self {
            id,
            name,
            description: input.description.unwrap_or_default(),
            members: MIN_MEMBERS,
            active_tasks: 0,
            active_today: 0,
            role: input.role.unwrap_or_default(),
            color: color_or_default(input.color),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply_patch(
        &mut self,
        patch: TribePatch,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        let name = patch
            .name
            .as_deref()
            .map(|name| required_text(name, "name"))
            .transpose()?;
        if let Some(members) = patch.members {
            if members < MIN_MEMBERS {
                return Err(ValidationError::MemberCountBelowMinimum(members));
            }
        }

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(color) = patch.color {
            self.color = color_or_default(Some(color));
        }
        if let Some(members) = patch.members {
            self.members = members;
        }
        if let Some(active_tasks) = patch.active_tasks {
            self.active_tasks = active_tasks;
        }
        if let Some(active_today) = patch.active_today {
            self.active_today = active_today;
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Restores the member floor and default color on a loaded record.
    /// Returns whether anything changed.
    pub fn reconcile(&mut self) -> bool {
        let mut changed = false;
        if self.members < MIN_MEMBERS {
            self.members = MIN_MEMBERS;
            changed = true;
        }
        if self.color.trim().is_empty() {
            self.color = DEFAULT_TRIBE_COLOR.to_string();
            changed = true;
        }
        changed
    }

    pub fn add_member(&mut self, now: DateTime<Utc>) {
        self.members = self.members.saturating_add(1);
        self.updated_at = now;
    }

    /// Removes one member, never going below the creator.
    pub fn remove_member(&mut self, now: DateTime<Utc>) {
        self.members = self.members.saturating_sub(1).max(MIN_MEMBERS);
        self.updated_at = now;
    }
}

fn color_or_default(color: Option<String>) -> String {
    color
        .filter(|color| !color.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_TRIBE_COLOR.to_string())
}
