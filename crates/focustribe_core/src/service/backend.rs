//! Mock backend facade.
//!
//! # Responsibility
//! - Own the store adapter, identifier allocator and all repositories as one
//!   explicitly constructed object.
//! - Route every collaborator operation to the owning repository.
//! - Recompute derived stats after each successful mutation.
//!
//! # Invariants
//! - Every operation runs to completion synchronously; none contains a
//!   suspension point between allocation, mutation and persistence.
//! - Stats snapshots are never persisted and never reused across mutations.

use crate::clock::{Clock, SystemClock};
use crate::config::BackendConfig;
use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::ids::{Counters, IdAllocator};
use crate::model::session::{FocusSession, NewSession, SessionId, SessionPatch};
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::model::tribe::{NewTribe, Tribe, TribeId, TribePatch};
use crate::model::user::{Credentials, RegisterRequest, UserProfile};
use crate::repo::session_repo::{SessionFilter, SessionRepository};
use crate::repo::task_repo::{TaskFilter, TaskRepository};
use crate::repo::tribe_repo::TribeRepository;
use crate::repo::{DeleteConfirmation, RepoResult, WriteContext};
use crate::seed::SeedData;
use crate::service::auth_service::{stored_user, AuthService};
use crate::stats::{
    build_dashboard_feed, compute_analytics, compute_stats, Analytics, DashboardStats,
    DerivedStats,
};
use crate::store::{KeyValueStore, PersistenceFailure, SqliteKvStore, StoreAdapter};
use chrono::{DateTime, Local, Utc};
use log::{debug, info};

/// Durability sink, identifier source and clock shared by all writes.
struct WriteState {
    store: StoreAdapter,
    ids: IdAllocator,
    clock: Box<dyn Clock>,
}

impl WriteState {
    fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    fn context(&mut self) -> WriteContext<'_> {
        let now = self.clock.now().with_timezone(&Utc);
        WriteContext {
            store: &mut self.store,
            ids: &mut self.ids,
            now,
        }
    }
}

pub struct Backend {
    config: BackendConfig,
    writes: WriteState,
    tasks: TaskRepository,
    tribes: TribeRepository,
    sessions: SessionRepository,
    last_stats: DerivedStats,
}

impl Backend {
    /// Opens the configured SQLite medium using the wall clock.
    pub fn open(config: BackendConfig) -> DbResult<Self> {
        Self::open_with_clock(config, Box::new(SystemClock))
    }

    pub fn open_with_clock(config: BackendConfig, clock: Box<dyn Clock>) -> DbResult<Self> {
        let conn = match &config.db_path {
            Some(path) => open_db(path)?,
            None => open_db_in_memory()?,
        };
        let medium = SqliteKvStore::new(conn, config.namespace.clone());
        Ok(Self::with_medium(config, Box::new(medium), clock))
    }

    /// Builds a backend over any key-value medium.
    ///
    /// Persisted collections win over seed data; counters are seeded from the
    /// loaded collections and then overridden by any persisted counters.
    pub fn with_medium(
        config: BackendConfig,
        medium: Box<dyn KeyValueStore>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut store = StoreAdapter::new(medium);
        let seed = if config.seed_demo_data {
            SeedData::demo(clock.now())
        } else {
            SeedData::empty()
        };

        let tasks = TaskRepository::load(&mut store, &seed.tasks);
        let tribes = TribeRepository::load(&mut store, &seed.tribes);
        let sessions = SessionRepository::load(&mut store, &seed.sessions);
        let ids = IdAllocator::restore(
            &store,
            Counters::seeded(tasks.max_id(), tribes.max_id(), sessions.max_id()),
        );

        let mut backend = Self {
            config,
            writes: WriteState { store, ids, clock },
            tasks,
            tribes,
            sessions,
            last_stats: DerivedStats::default(),
        };
        backend.refresh_stats();
        info!(
            "event=backend_open module=service status=ok namespace={} tasks={} tribes={} sessions={}",
            backend.config.namespace,
            backend.tasks.len(),
            backend.tribes.len(),
            backend.sessions.as_slice().len()
        );
        backend
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn counters(&self) -> Counters {
        self.writes.ids.counters()
    }

    /// Drains durability failures absorbed since the last call.
    pub fn take_persistence_failures(&mut self) -> Vec<PersistenceFailure> {
        self.writes.store.take_failures()
    }

    // Tasks

    pub fn list_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        self.tasks.list(filter)
    }

    pub fn get_task(&self, id: TaskId) -> RepoResult<Task> {
        self.tasks.get(id)
    }

    pub fn create_task(&mut self, input: NewTask) -> RepoResult<Task> {
        let result = self.tasks.create(input, &mut self.writes.context());
        self.settle(result)
    }

    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> RepoResult<Task> {
        let result = self.tasks.update(id, patch, &mut self.writes.context());
        self.settle(result)
    }

    pub fn delete_task(&mut self, id: TaskId) -> RepoResult<DeleteConfirmation> {
        let result = self.tasks.delete(id, &mut self.writes.store);
        self.settle(result)
    }

    pub fn toggle_task_completed(&mut self, id: TaskId) -> RepoResult<Task> {
        let result = self.tasks.toggle_completed(id, &mut self.writes.context());
        self.settle(result)
    }

    /// Starring has no effect on stats, so no snapshot refresh is needed.
    pub fn toggle_task_starred(&mut self, id: TaskId) -> RepoResult<Task> {
        self.tasks.toggle_starred(id, &mut self.writes.context())
    }

    // Tribes

    pub fn list_tribes(&self) -> Vec<Tribe> {
        self.tribes.list()
    }

    pub fn get_tribe(&self, id: TribeId) -> RepoResult<Tribe> {
        self.tribes.get(id)
    }

    pub fn create_tribe(&mut self, input: NewTribe) -> RepoResult<Tribe> {
        let result = self.tribes.create(input, &mut self.writes.context());
        self.settle(result)
    }

    pub fn update_tribe(&mut self, id: TribeId, patch: TribePatch) -> RepoResult<Tribe> {
        let result = self.tribes.update(id, patch, &mut self.writes.context());
        self.settle(result)
    }

    pub fn delete_tribe(&mut self, id: TribeId) -> RepoResult<DeleteConfirmation> {
        let result = self.tribes.delete(id, &mut self.writes.store);
        self.settle(result)
    }

    pub fn add_tribe_member(&mut self, id: TribeId) -> RepoResult<Tribe> {
        let result = self.tribes.add_member(id, &mut self.writes.context());
        self.settle(result)
    }

    pub fn remove_tribe_member(&mut self, id: TribeId) -> RepoResult<Tribe> {
        let result = self.tribes.remove_member(id, &mut self.writes.context());
        self.settle(result)
    }

    // Focus sessions

    pub fn list_sessions(&self, filter: &SessionFilter) -> Vec<FocusSession> {
        self.sessions.list(filter)
    }

    pub fn get_session(&self, id: SessionId) -> RepoResult<FocusSession> {
        self.sessions.get(id)
    }

    pub fn create_session(&mut self, input: NewSession) -> RepoResult<FocusSession> {
        let result = self.sessions.create(input, &mut self.writes.context());
        self.settle(result)
    }

    pub fn update_session(
        &mut self,
        id: SessionId,
        patch: SessionPatch,
    ) -> RepoResult<FocusSession> {
        let result = self.sessions.update(id, patch, &mut self.writes.context());
        self.settle(result)
    }

    pub fn complete_session(&mut self, id: SessionId) -> RepoResult<FocusSession> {
        let result = self.sessions.complete(id, &mut self.writes.context());
        self.settle(result)
    }

    pub fn delete_session(&mut self, id: SessionId) -> RepoResult<DeleteConfirmation> {
        let result = self.sessions.delete(id, &mut self.writes.store);
        self.settle(result)
    }

    // Derived views

    /// Recomputes stats from live state.
    pub fn stats(&self) -> DerivedStats {
        compute_stats(
            self.tasks.as_slice(),
            self.tribes.as_slice(),
            self.sessions.as_slice(),
            self.writes.now(),
        )
    }

    /// Snapshot taken after the most recent mutation (or at open).
    pub fn last_stats(&self) -> DerivedStats {
        self.last_stats
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats {
            stats: self.stats(),
            recent_tasks: build_dashboard_feed(self.tasks.as_slice(), self.writes.now()),
        }
    }

    pub fn analytics(&self) -> Analytics {
        compute_analytics(self.tasks.as_slice())
    }

    // Identity

    pub fn current_user(&self) -> Option<UserProfile> {
        stored_user(&self.writes.store)
    }

    pub fn register(&mut self, request: RegisterRequest) -> RepoResult<UserProfile> {
        self.auth().register(request)
    }

    pub fn login(&mut self, credentials: Credentials) -> RepoResult<UserProfile> {
        self.auth().login(credentials)
    }

    pub fn logout(&mut self) {
        self.auth().logout();
    }

    fn auth(&mut self) -> AuthService<'_> {
        let now = self.writes.now().with_timezone(&Utc);
        AuthService::new(&mut self.writes.store, now)
    }

    fn settle<T>(&mut self, result: RepoResult<T>) -> RepoResult<T> {
        if result.is_ok() {
            self.refresh_stats();
        }
        result
    }

    fn refresh_stats(&mut self) {
        self.last_stats = self.stats();
        debug!(
            "event=stats_recompute module=service status=ok due_today={} completed={} total={}",
            self.last_stats.due_today,
            self.last_stats.tasks_progress.completed,
            self.last_stats.tasks_progress.total
        );
    }
}
