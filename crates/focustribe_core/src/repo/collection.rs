//! Ordered, persisted entity collection shared by the repositories.

use super::{DeleteConfirmation, RepoError, RepoResult};
use crate::model::validation::ValidationError;
use crate::model::Entity;
use crate::store::StoreAdapter;
use log::{info, warn};

pub(crate) struct Collection<T: Entity> {
    key: &'static str,
    items: Vec<T>,
}

impl<T: Entity> Collection<T> {
    pub(crate) fn load(store: &StoreAdapter, key: &'static str, seed: &[T]) -> Self {
        let items = store.load(key, &seed.to_vec());
        Self { key, items }
    }

    pub(crate) fn items(&self) -> &[T] {
        &self.items
    }

    /// Runs `fix` over every loaded record and re-persists if any changed.
    pub(crate) fn repair<F>(&mut self, store: &mut StoreAdapter, mut fix: F) -> usize
    where
        F: FnMut(&mut T) -> bool,
    {
        let mut repaired = 0_usize;
        for item in &mut self.items {
            if fix(item) {
                repaired += 1;
            }
        }
        if repaired > 0 {
            warn!(
                "event={}_load module=repo status=repaired count={repaired}",
                T::KIND
            );
            self.persist(store);
        }
        repaired
    }

    pub(crate) fn max_id(&self) -> Option<u64> {
        self.items.iter().map(|item| item.id()).max()
    }

    pub(crate) fn get(&self, id: u64) -> RepoResult<T> {
        self.items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
            .ok_or(RepoError::NotFound { kind: T::KIND, id })
    }

    pub(crate) fn prepend(&mut self, item: T, store: &mut StoreAdapter) -> T {
        self.items.insert(0, item.clone());
        self.persist(store);
        self.log_write("create", item.id());
        item
    }

    pub(crate) fn append(&mut self, item: T, store: &mut StoreAdapter) -> T {
        self.items.push(item.clone());
        self.persist(store);
        self.log_write("create", item.id());
        item
    }

    /// Applies `change` to a copy and commits it only if the change succeeds.
    pub(crate) fn modify<F>(
        &mut self,
        id: u64,
        store: &mut StoreAdapter,
        change: F,
    ) -> RepoResult<T>
    where
        F: FnOnce(&mut T) -> Result<(), ValidationError>,
    {
        let index = self.position(id)?;
        let mut updated = self.items[index].clone();
        change(&mut updated)?;
        self.items[index] = updated.clone();
        self.persist(store);
        self.log_write("update", id);
        Ok(updated)
    }

    pub(crate) fn remove(
        &mut self,
        id: u64,
        store: &mut StoreAdapter,
    ) -> RepoResult<DeleteConfirmation> {
        let index = self.position(id)?;
        self.items.remove(index);
        self.persist(store);
        self.log_write("delete", id);
        Ok(DeleteConfirmation { kind: T::KIND, id })
    }

    pub(crate) fn persist(&self, store: &mut StoreAdapter) {
        store.save(self.key, &self.items);
    }

    fn position(&self, id: u64) -> RepoResult<usize> {
        self.items
            .iter()
            .position(|item| item.id() == id)
            .ok_or(RepoError::NotFound { kind: T::KIND, id })
    }

    fn log_write(&self, operation: &str, id: u64) {
        info!(
            "event={}_{operation} module=repo status=ok id={id} count={}",
            T::KIND,
            self.items.len()
        );
    }
}
