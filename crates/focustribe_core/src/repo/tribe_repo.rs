//! Tribe repository. Tribes keep append order.

use super::collection::Collection;
use super::{DeleteConfirmation, RepoResult, WriteContext};
use crate::model::tribe::{NewTribe, Tribe, TribeId, TribePatch};
use crate::model::EntityKind;
use crate::store::{StoreAdapter, TRIBES_KEY};

pub struct TribeRepository {
    tribes: Collection<Tribe>,
}

impl TribeRepository {
    /// Loads persisted tribes (or `seed` on first run), restoring the member floor.
    pub fn load(store: &mut StoreAdapter, seed: &[Tribe]) -> Self {
        let mut tribes = Collection::load(store, TRIBES_KEY, seed);
        tribes.repair(store, Tribe::reconcile);
        Self { tribes }
    }

    pub(crate) fn as_slice(&self) -> &[Tribe] {
        self.tribes.items()
    }

    pub fn max_id(&self) -> Option<TribeId> {
        self.tribes.max_id()
    }

    pub fn len(&self) -> usize {
        self.tribes.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tribes.items().is_empty()
    }

    pub fn list(&self) -> Vec<Tribe> {
        self.tribes.items().to_vec()
    }

    pub fn get(&self, id: TribeId) -> RepoResult<Tribe> {
        self.tribes.get(id)
    }

    pub fn create(&mut self, input: NewTribe, ctx: &mut WriteContext<'_>) -> RepoResult<Tribe> {
        let mut tribe = Tribe::from_input(0, input, ctx.now)?;
        tribe.id = ctx.allocate(EntityKind::Tribe)?;
        Ok(self.tribes.append(tribe, ctx.store))
    }

    pub fn update(
        &mut self,
        id: TribeId,
        patch: TribePatch,
        ctx: &mut WriteContext<'_>,
    ) -> RepoResult<Tribe> {
        let now = ctx.now;
        self.tribes
            .modify(id, ctx.store, |tribe| tribe.apply_patch(patch, now))
    }

    pub fn delete(
        &mut self,
        id: TribeId,
        store: &mut StoreAdapter,
    ) -> RepoResult<DeleteConfirmation> {
        self.tribes.remove(id, store)
    }

    pub fn add_member(&mut self, id: TribeId, ctx: &mut WriteContext<'_>) -> RepoResult<Tribe> {
        let now = ctx.now;
        self.tribes.modify(id, ctx.store, |tribe| {
            tribe.add_member(now);
            Ok(())
        })
    }

    pub fn remove_member(
        &mut self,
        id: TribeId,
        ctx: &mut WriteContext<'_>,
    ) -> RepoResult<Tribe> {
        let now = ctx.now;
        self.tribes.modify(id, ctx.store, |tribe| {
            tribe.remove_member(now);
            Ok(())
        })
    }
}
