//! Per-kind monotonic identifier allocation.
//!
//! # Invariants
//! - An allocated identifier is never handed out again, even after deletes.
//! - Counters are persisted under `counters` after every allocation.
//! - A persisted counter overrides the seeded value but is never allowed
//!   below `max(existing id) + 1`.
//! - A counter at `u64::MAX` is exhausted; allocation fails instead of
//!   repeating an identifier.

use crate::model::EntityKind;
use crate::store::{StoreAdapter, COUNTERS_KEY};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// No identifier is left for an entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdSpaceExhausted {
    pub kind: EntityKind,
}

impl Display for IdSpaceExhausted {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} identifiers exhausted", self.kind)
    }
}

impl Error for IdSpaceExhausted {}

/// Next identifier to allocate for each entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Counters {
    pub task_id: u64,
    pub tribe_id: u64,
    pub session_id: u64,
}

impl Counters {
    /// Seeds each counter as `max(existing) + 1`, or 1 for empty collections.
    pub fn seeded(max_task: Option<u64>, max_tribe: Option<u64>, max_session: Option<u64>) -> Self {
        Self {
            task_id: next_after(max_task),
            tribe_id: next_after(max_tribe),
            session_id: next_after(max_session),
        }
    }

    fn slot(&mut self, kind: EntityKind) -> &mut u64 {
        match kind {
            EntityKind::Task => &mut self.task_id,
            EntityKind::Tribe => &mut self.tribe_id,
            EntityKind::Session => &mut self.session_id,
        }
    }

    pub fn peek(&self, kind: EntityKind) -> u64 {
        match kind {
            EntityKind::Task => self.task_id,
            EntityKind::Tribe => self.tribe_id,
            EntityKind::Session => self.session_id,
        }
    }
}

// `u64::MAX` doubles as the exhausted marker, so it is never issued.
fn next_after(max: Option<u64>) -> u64 {
    max.map_or(1, |max| max.checked_add(1).unwrap_or(u64::MAX))
}

#[derive(Debug, Clone)]
pub struct IdAllocator {
    counters: Counters,
}

impl IdAllocator {
    /// Restores counters from the store, falling back to `seeded`.
    ///
    /// A persisted counter that lags behind the live collections is raised to
    /// the seeded value so no existing identifier can be reissued.
    pub fn restore(store: &StoreAdapter, seeded: Counters) -> Self {
        let persisted = store.load(COUNTERS_KEY, &seeded);
        let counters = Counters {
            task_id: persisted.task_id.max(seeded.task_id),
            tribe_id: persisted.tribe_id.max(seeded.tribe_id),
            session_id: persisted.session_id.max(seeded.session_id),
        };
        Self { counters }
    }

    /// Returns the current counter for `kind`, advances it and persists all counters.
    ///
    /// # Errors
    /// - `IdSpaceExhausted` once the counter cannot advance; nothing changes.
    pub fn next(
        &mut self,
        kind: EntityKind,
        store: &mut StoreAdapter,
    ) -> Result<u64, IdSpaceExhausted> {
        let slot = self.counters.slot(kind);
        let id = *slot;
        let Some(advanced) = id.checked_add(1) else {
            warn!("event=id_allocate module=ids status=exhausted kind={kind}");
            return Err(IdSpaceExhausted { kind });
        };
        *slot = advanced;
        store.save(COUNTERS_KEY, &self.counters);
        debug!("event=id_allocate module=ids status=ok kind={kind} id={id}");
        Ok(id)
    }

    pub fn counters(&self) -> Counters {
        self.counters
    }
}
