//! Task repository.
//!
//! # Invariants
//! - List order is most-recent-first: new tasks are prepended.
//! - Every task leaving this repository satisfies `Task::is_consistent()`.

use super::collection::Collection;
use super::{DeleteConfirmation, RepoResult, WriteContext};
use crate::model::task::{NewTask, Task, TaskId, TaskPatch, TaskStatus};
use crate::model::tribe::TribeId;
use crate::model::EntityKind;
use crate::store::{StoreAdapter, TASKS_KEY};
use serde::Deserialize;

/// Exact-match filter over enumerable task fields. `None` matches anything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilter {
    #[serde(default)]
    pub status: Option<TaskStatus>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub tribe_id: Option<TribeId>,
    #[serde(default)]
    pub starred: Option<bool>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        self.status.map_or(true, |status| task.status == status)
            && self
                .completed
                .map_or(true, |completed| task.completed == completed)
            && self
                .tribe_id
                .map_or(true, |tribe_id| task.tribe_id == Some(tribe_id))
            && self.starred.map_or(true, |starred| task.starred == starred)
    }
}

pub struct TaskRepository {
    tasks: Collection<Task>,
}

impl TaskRepository {
    /// Loads persisted tasks (or `seed` on first run), repairing inconsistent records.
    pub fn load(store: &mut StoreAdapter, seed: &[Task]) -> Self {
        let mut tasks = Collection::load(store, TASKS_KEY, seed);
        tasks.repair(store, Task::reconcile);
        Self { tasks }
    }

    pub(crate) fn as_slice(&self) -> &[Task] {
        self.tasks.items()
    }

    pub fn max_id(&self) -> Option<TaskId> {
        self.tasks.max_id()
    }

    pub fn len(&self) -> usize {
        self.tasks.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.items().is_empty()
    }

    pub fn list(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks
            .items()
            .iter()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: TaskId) -> RepoResult<Task> {
        self.tasks.get(id)
    }

    pub fn create(&mut self, input: NewTask, ctx: &mut WriteContext<'_>) -> RepoResult<Task> {
        let mut task = Task::from_input(0, input, ctx.now)?;
        task.id = ctx.allocate(EntityKind::Task)?;
        Ok(self.tasks.prepend(task, ctx.store))
    }

    pub fn update(
        &mut self,
        id: TaskId,
        patch: TaskPatch,
        ctx: &mut WriteContext<'_>,
    ) -> RepoResult<Task> {
        let now = ctx.now;
        self.tasks
            .modify(id, ctx.store, |task| task.apply_patch(patch, now))
    }

    pub fn delete(
        &mut self,
        id: TaskId,
        store: &mut StoreAdapter,
    ) -> RepoResult<DeleteConfirmation> {
        self.tasks.remove(id, store)
    }

    pub fn toggle_completed(
        &mut self,
        id: TaskId,
        ctx: &mut WriteContext<'_>,
    ) -> RepoResult<Task> {
        let now = ctx.now;
        self.tasks.modify(id, ctx.store, |task| {
            task.toggle_completed(now);
            Ok(())
        })
    }

    pub fn toggle_starred(&mut self, id: TaskId, ctx: &mut WriteContext<'_>) -> RepoResult<Task> {
        let now = ctx.now;
        self.tasks.modify(id, ctx.store, |task| {
            task.toggle_starred(now);
            Ok(())
        })
    }
}
