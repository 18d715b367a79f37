//! Durable key-value medium and the best-effort adapter in front of it.
//!
//! # Responsibility
//! - Define the `KeyValueStore` contract used for persistence.
//! - Provide the SQLite-backed implementation.
//! - Keep in-memory state authoritative when durability fails.
//!
//! # Invariants
//! - Values are JSON documents keyed by `(namespace, key)`.
//! - Adapter write failures are logged and recorded, never returned.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod adapter;
mod sqlite;

pub use adapter::{PersistenceFailure, StoreAdapter};
pub use sqlite::SqliteKvStore;

pub const TASKS_KEY: &str = "tasks";
pub const TRIBES_KEY: &str = "tribes";
pub const SESSIONS_KEY: &str = "sessions";
pub const USER_KEY: &str = "user";
pub const COUNTERS_KEY: &str = "counters";

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialization(serde_json::Error),
    /// Medium refused the write (quota, read-only volume, ...).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "serialization failed: {err}"),
            Self::Unavailable(message) => write!(f, "store unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Raw string key-value medium.
pub trait KeyValueStore: Send {
    fn read(&self, key: &str) -> StoreResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&mut self, key: &str) -> StoreResult<()>;
}
