//! Best-effort JSON persistence over a `KeyValueStore`.
//!
//! # Invariants
//! - `load` never returns storage it could not parse; it falls back to an
//!   owned clone of the caller's default.
//! - `save`/`remove` failures are logged at `error` and recorded as
//!   `PersistenceFailure` events; callers never see them.

use super::{KeyValueStore, StoreError, StoreResult};
use log::{error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Durability write that did not reach the medium.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceFailure {
    pub key: String,
    pub operation: &'static str,
    pub message: String,
}

pub struct StoreAdapter {
    medium: Box<dyn KeyValueStore>,
    failures: Vec<PersistenceFailure>,
}

impl StoreAdapter {
    pub fn new(medium: Box<dyn KeyValueStore>) -> Self {
        Self {
            medium,
            failures: Vec::new(),
        }
    }

    /// Returns the stored value for `key`, or a fresh clone of `default`.
    pub fn load<T>(&self, key: &str, default: &T) -> T
    where
        T: DeserializeOwned + Clone,
    {
        self.load_present(key).unwrap_or_else(|| default.clone())
    }

    /// Returns the stored value for `key` when present and parseable.
    pub fn load_present<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.medium.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!("event=store_load module=store status=error key={key} error={err}");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=store_load module=store status=error key={key} error_code=parse_failed error={err}"
                );
                None
            }
        }
    }

    /// Serializes and stores `value` under `key`.
    pub fn save<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(StoreError::from)
            .and_then(|raw| self.medium.write(key, &raw));
        self.absorb(key, "save", result);
    }

    pub fn remove(&mut self, key: &str) {
        let result = self.medium.remove(key);
        self.absorb(key, "remove", result);
    }

    /// Drains recorded durability failures for monitoring callers.
    pub fn take_failures(&mut self) -> Vec<PersistenceFailure> {
        std::mem::take(&mut self.failures)
    }

    fn absorb(&mut self, key: &str, operation: &'static str, result: StoreResult<()>) {
        if let Err(err) = result {
            error!("event=store_{operation} module=store status=error key={key} error={err}");
            self.failures.push(PersistenceFailure {
                key: key.to_string(),
                operation,
                message: err.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::StoreAdapter;
    use crate::db::open_db_in_memory;
    use crate::store::{KeyValueStore, SqliteKvStore, StoreError, StoreResult};

    struct FullMedium;

    impl KeyValueStore for FullMedium {
        fn read(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        fn write(&mut self, _key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("quota exceeded".to_string()))
        }

        fn remove(&mut self, _key: &str) -> StoreResult<()> {
            Err(StoreError::Unavailable("quota exceeded".to_string()))
        }
    }

    fn sqlite_adapter() -> StoreAdapter {
        let medium = SqliteKvStore::new(open_db_in_memory().unwrap(), "test");
        StoreAdapter::new(Box::new(medium))
    }

    #[test]
    fn load_returns_independent_copy_of_default() {
        let adapter = sqlite_adapter();
        let default = vec![1_u64, 2, 3];

        let mut first: Vec<u64> = adapter.load("numbers", &default);
        first.push(4);
        let second: Vec<u64> = adapter.load("numbers", &default);

        assert_eq!(second, vec![1, 2, 3]);
        assert_eq!(default, vec![1, 2, 3]);
    }

    #[test]
    fn load_falls_back_on_unparseable_value() {
        let mut medium = SqliteKvStore::new(open_db_in_memory().unwrap(), "test");
        medium.write("numbers", "{not json").unwrap();
        let adapter = StoreAdapter::new(Box::new(medium));

        let loaded: Vec<u64> = adapter.load("numbers", &vec![9]);
        assert_eq!(loaded, vec![9]);
    }

    #[test]
    fn save_then_load_returns_saved_value() {
        let mut adapter = sqlite_adapter();
        adapter.save("numbers", &vec![5_u64, 6]);
        let loaded: Vec<u64> = adapter.load("numbers", &Vec::new());
        assert_eq!(loaded, vec![5, 6]);
        assert!(adapter.take_failures().is_empty());
    }

    #[test]
    fn save_failure_is_recorded_not_raised() {
        let mut adapter = StoreAdapter::new(Box::new(FullMedium));
        adapter.save("tasks", &vec![1_u64]);
        adapter.remove("user");

        let failures = adapter.take_failures();
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].key, "tasks");
        assert_eq!(failures[0].operation, "save");
        assert!(failures[0].message.contains("quota exceeded"));
        assert!(adapter.take_failures().is_empty());
    }
}
