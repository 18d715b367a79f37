//! Focus session repository. Sessions are listed most-recent-first.

use super::collection::Collection;
use super::{DeleteConfirmation, RepoResult, WriteContext};
use crate::model::session::{FocusSession, NewSession, SessionId, SessionPatch, SessionStatus};
use crate::model::EntityKind;
use crate::store::{StoreAdapter, SESSIONS_KEY};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionFilter {
    #[serde(default)]
    pub status: Option<SessionStatus>,
}

impl SessionFilter {
    pub fn matches(&self, session: &FocusSession) -> bool {
        self.status.map_or(true, |status| session.status == status)
    }
}

pub struct SessionRepository {
    sessions: Collection<FocusSession>,
}

impl SessionRepository {
    /// Loads persisted sessions (or `seed` on first run), re-deriving
    /// `completed_at` from `status`.
    pub fn load(store: &mut StoreAdapter, seed: &[FocusSession]) -> Self {
        let mut sessions = Collection::load(store, SESSIONS_KEY, seed);
        sessions.repair(store, FocusSession::reconcile);
        Self { sessions }
    }

    pub(crate) fn as_slice(&self) -> &[FocusSession] {
        self.sessions.items()
    }

    pub fn max_id(&self) -> Option<SessionId> {
        self.sessions.max_id()
    }

    pub fn list(&self, filter: &SessionFilter) -> Vec<FocusSession> {
        self.sessions
            .items()
            .iter()
            .filter(|session| filter.matches(session))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: SessionId) -> RepoResult<FocusSession> {
        self.sessions.get(id)
    }

    pub fn create(
        &mut self,
        input: NewSession,
        ctx: &mut WriteContext<'_>,
    ) -> RepoResult<FocusSession> {
        let mut session = FocusSession::from_input(0, input, ctx.now)?;
        session.id = ctx.allocate(EntityKind::Session)?;
        Ok(self.sessions.prepend(session, ctx.store))
    }

    pub fn update(
        &mut self,
        id: SessionId,
        patch: SessionPatch,
        ctx: &mut WriteContext<'_>,
    ) -> RepoResult<FocusSession> {
        let now = ctx.now;
        self.sessions
            .modify(id, ctx.store, |session| session.apply_patch(patch, now))
    }

    pub fn complete(
        &mut self,
        id: SessionId,
        ctx: &mut WriteContext<'_>,
    ) -> RepoResult<FocusSession> {
        let now = ctx.now;
        self.sessions.modify(id, ctx.store, |session| {
            session.complete(now);
            Ok(())
        })
    }

    pub fn delete(
        &mut self,
        id: SessionId,
        store: &mut StoreAdapter,
    ) -> RepoResult<DeleteConfirmation> {
        self.sessions.remove(id, store)
    }
}
