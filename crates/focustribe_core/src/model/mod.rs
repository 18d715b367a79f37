//! Entity model for the mock backend.
//!
//! # Responsibility
//! - Define the persisted records (task, tribe, focus session, user profile).
//! - Define creation inputs and typed patches so every mutation goes through
//!   an explicit field-by-field merge.
//!
//! # Invariants
//! - Each entity kind owns its own integer identifier namespace.
//! - Task completion state is only changed through `Task` methods that keep
//!   `completed`, `status` and `completed_at` in agreement.

pub mod session;
pub mod task;
pub mod tribe;
pub mod user;
pub mod validation;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{Display, Formatter};

/// One identifier namespace per entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Task,
    Tribe,
    Session,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Tribe => "tribe",
            Self::Session => "session",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Record held by a repository collection.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    const KIND: EntityKind;

    fn id(&self) -> u64;
}

/// Distinguishes "field absent" from "field explicitly set to null" in patches.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trims a required text field, rejecting blank input.
pub(crate) fn required_text(
    value: &str,
    field: &'static str,
) -> Result<String, validation::ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(validation::ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}
