//! Backend configuration.

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_NAMESPACE: &str = "focustribe";
pub const DEFAULT_LATENCY_MS: u64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Shared namespace all persisted keys live under.
    pub namespace: String,
    /// SQLite file; `None` keeps state in memory for the process lifetime.
    pub db_path: Option<PathBuf>,
    /// Delay applied before every async API call.
    pub latency: Duration,
    /// Load demo records when nothing has been persisted yet.
    pub seed_demo_data: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            db_path: None,
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            seed_demo_data: true,
        }
    }
}

impl BackendConfig {
    /// In-memory, no latency, no demo data.
    pub fn ephemeral() -> Self {
        Self {
            latency: Duration::ZERO,
            seed_demo_data: false,
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_db_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.db_path = Some(path.into());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_seed_demo_data(mut self, seed: bool) -> Self {
        self.seed_demo_data = seed;
        self
    }
}
