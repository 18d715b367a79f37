//! Mock backend engine for FocusTribe.
//!
//! Holds the authoritative copy of tasks, tribes and focus sessions, allocates
//! identifiers, persists state to a local key-value store and computes the
//! dashboard views. UI collaborators talk to it through `MockApi`.

pub mod api;
pub mod clock;
pub mod config;
pub mod db;
pub mod ids;
pub mod logging;
pub mod model;
pub mod repo;
pub mod seed;
pub mod service;
pub mod stats;
pub mod store;

pub use api::{LatencySimulator, MockApi};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::BackendConfig;
pub use ids::{Counters, IdAllocator, IdSpaceExhausted};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::session::{FocusSession, NewSession, SessionId, SessionPatch, SessionStatus};
pub use model::task::{NewTask, Priority, Task, TaskId, TaskPatch, TaskStatus};
pub use model::tribe::{NewTribe, Tribe, TribeId, TribePatch, TribeRole};
pub use model::user::{Credentials, RegisterRequest, UserProfile};
pub use model::validation::ValidationError;
pub use model::EntityKind;
pub use repo::session_repo::SessionFilter;
pub use repo::task_repo::TaskFilter;
pub use repo::{DeleteConfirmation, RepoError, RepoResult};
pub use service::backend::Backend;
pub use stats::{Analytics, DashboardStats, DerivedStats, TaskProgress};
pub use store::{KeyValueStore, PersistenceFailure, SqliteKvStore, StoreError, StoreResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
