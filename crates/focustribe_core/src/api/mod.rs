//! Asynchronous collaborator surface over the mock backend.
//!
//! # Responsibility
//! - Expose every backend operation as an async call delayed by the
//!   configured latency, emulating a network service.
//!
//! # Invariants
//! - The backend lock is taken only after the delay and released before the
//!   call resolves; it is never held across an await.
//! - Callers receive owned values, never references into live collections.

mod latency;

pub use latency::LatencySimulator;

use crate::model::session::{FocusSession, NewSession, SessionId, SessionPatch};
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::model::tribe::{NewTribe, Tribe, TribeId, TribePatch};
use crate::model::user::{Credentials, RegisterRequest, UserProfile};
use crate::repo::session_repo::SessionFilter;
use crate::repo::task_repo::TaskFilter;
use crate::repo::{DeleteConfirmation, RepoResult};
use crate::service::backend::Backend;
use crate::stats::{Analytics, DashboardStats};
use crate::store::PersistenceFailure;
use std::sync::{Arc, Mutex, PoisonError};

/// Cloneable handle; clones share one backend.
#[derive(Clone)]
pub struct MockApi {
    backend: Arc<Mutex<Backend>>,
    latency: LatencySimulator,
}

impl MockApi {
    /// Wraps `backend`, using its configured latency.
    pub fn new(backend: Backend) -> Self {
        let latency = LatencySimulator::new(backend.config().latency);
        Self::with_latency(backend, latency)
    }

    pub fn with_latency(backend: Backend, latency: LatencySimulator) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
            latency,
        }
    }

    async fn call<T>(&self, operation: impl FnOnce(&mut Backend) -> T) -> T {
        self.latency
            .run(|| {
                let mut backend = self
                    .backend
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner);
                operation(&mut *backend)
            })
            .await
    }

    // Identity

    pub async fn get_current_user(&self) -> Option<UserProfile> {
        self.call(|backend| backend.current_user()).await
    }

    pub async fn register(&self, request: RegisterRequest) -> RepoResult<UserProfile> {
        self.call(move |backend| backend.register(request)).await
    }

    pub async fn login(&self, credentials: Credentials) -> RepoResult<UserProfile> {
        self.call(move |backend| backend.login(credentials)).await
    }

    pub async fn logout(&self) {
        self.call(|backend| backend.logout()).await
    }

    // Tasks

    pub async fn list_tasks(&self, filter: TaskFilter) -> Vec<Task> {
        self.call(move |backend| backend.list_tasks(&filter)).await
    }

    pub async fn get_task(&self, id: TaskId) -> RepoResult<Task> {
        self.call(move |backend| backend.get_task(id)).await
    }

    pub async fn create_task(&self, input: NewTask) -> RepoResult<Task> {
        self.call(move |backend| backend.create_task(input)).await
    }

    pub async fn update_task(&self, id: TaskId, patch: TaskPatch) -> RepoResult<Task> {
        self.call(move |backend| backend.update_task(id, patch)).await
    }

    pub async fn delete_task(&self, id: TaskId) -> RepoResult<DeleteConfirmation> {
        self.call(move |backend| backend.delete_task(id)).await
    }

    pub async fn toggle_task_completed(&self, id: TaskId) -> RepoResult<Task> {
        self.call(move |backend| backend.toggle_task_completed(id))
            .await
    }

    pub async fn toggle_task_starred(&self, id: TaskId) -> RepoResult<Task> {
        self.call(move |backend| backend.toggle_task_starred(id))
            .await
    }

    // Tribes

    pub async fn list_tribes(&self) -> Vec<Tribe> {
        self.call(|backend| backend.list_tribes()).await
    }

    pub async fn get_tribe(&self, id: TribeId) -> RepoResult<Tribe> {
        self.call(move |backend| backend.get_tribe(id)).await
    }

    pub async fn create_tribe(&self, input: NewTribe) -> RepoResult<Tribe> {
        self.call(move |backend| backend.create_tribe(input)).await
    }

    pub async fn update_tribe(&self, id: TribeId, patch: TribePatch) -> RepoResult<Tribe> {
        self.call(move |backend| backend.update_tribe(id, patch)).await
    }

    pub async fn delete_tribe(&self, id: TribeId) -> RepoResult<DeleteConfirmation> {
        self.call(move |backend| backend.delete_tribe(id)).await
    }

    pub async fn add_tribe_member(&self, id: TribeId) -> RepoResult<Tribe> {
        self.call(move |backend| backend.add_tribe_member(id)).await
    }

    pub async fn remove_tribe_member(&self, id: TribeId) -> RepoResult<Tribe> {
        self.call(move |backend| backend.remove_tribe_member(id))
            .await
    }

    // Focus sessions

    pub async fn list_sessions(&self, filter: SessionFilter) -> Vec<FocusSession> {
        self.call(move |backend| backend.list_sessions(&filter)).await
    }

    pub async fn get_session(&self, id: SessionId) -> RepoResult<FocusSession> {
        self.call(move |backend| backend.get_session(id)).await
    }

    pub async fn create_session(&self, input: NewSession) -> RepoResult<FocusSession> {
        self.call(move |backend| backend.create_session(input)).await
    }

    pub async fn update_session(
        &self,
        id: SessionId,
        patch: SessionPatch,
    ) -> RepoResult<FocusSession> {
        self.call(move |backend| backend.update_session(id, patch))
            .await
    }

    pub async fn complete_session(&self, id: SessionId) -> RepoResult<FocusSession> {
        self.call(move |backend| backend.complete_session(id)).await
    }

    pub async fn delete_session(&self, id: SessionId) -> RepoResult<DeleteConfirmation> {
        self.call(move |backend| backend.delete_session(id)).await
    }

    // Stats

    pub async fn get_dashboard_stats(&self) -> DashboardStats {
        self.call(|backend| backend.dashboard_stats()).await
    }

    pub async fn get_analytics(&self) -> Analytics {
        self.call(|backend| backend.analytics()).await
    }

    /// Not delayed: this is a monitoring channel, not an emulated request.
    pub fn take_persistence_failures(&self) -> Vec<PersistenceFailure> {
        self.backend
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take_persistence_failures()
    }
}
