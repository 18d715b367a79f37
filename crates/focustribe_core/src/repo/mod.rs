//! In-memory entity repositories with write-through persistence.
//!
//! # Responsibility
//! - Own the authoritative collection for each entity kind.
//! - Surface semantic errors (`NotFound`, `Validation`) to callers.
//! - Persist the full collection after every successful write.
//!
//! # Invariants
//! - Reads hand out clones; callers never hold references into a collection.
//! - Identifiers are allocated only after input validation succeeds.
//! - A failed write leaves the collection unchanged.

mod collection;
pub mod session_repo;
pub mod task_repo;
pub mod tribe_repo;

use crate::ids::{IdAllocator, IdSpaceExhausted};
use crate::model::validation::ValidationError;
use crate::model::EntityKind;
use crate::store::StoreAdapter;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound { kind: EntityKind, id: u64 },
    Validation(ValidationError),
    IdsExhausted(IdSpaceExhausted),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::IdsExhausted(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NotFound { .. } => None,
            Self::Validation(err) => Some(err),
            Self::IdsExhausted(err) => Some(err),
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<IdSpaceExhausted> for RepoError {
    fn from(value: IdSpaceExhausted) -> Self {
        Self::IdsExhausted(value)
    }
}

/// Returned by delete operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteConfirmation {
    pub kind: EntityKind,
    pub id: u64,
}

/// Everything a write needs besides the collection itself.
pub struct WriteContext<'a> {
    pub store: &'a mut StoreAdapter,
    pub ids: &'a mut IdAllocator,
    pub now: DateTime<Utc>,
}

impl WriteContext<'_> {
    pub fn allocate(&mut self, kind: EntityKind) -> RepoResult<u64> {
        Ok(self.ids.next(kind, self.store)?)
    }
}
