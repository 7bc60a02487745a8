use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use trivia_core::model::ResultRecord;

/// Errors surfaced by leaderboard storage adapters.
///
/// A store that has never been written to is not an error; reads return an
/// empty list. `Corrupt` means the store exists but cannot be trusted and
/// must be surfaced to the caller rather than swallowed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(String),

    #[error("stored results are corrupt: {0}")]
    Corrupt(String),
}

/// Append-and-read contract for the shared leaderboard store.
///
/// The store is append-only from this system's point of view: records are
/// added once at session completion and never mutated or deleted.
#[async_trait]
pub trait ResultRepository: Send + Sync {
    /// Append one completed attempt.
    ///
    /// Creating the store on first write is the adapter's job; prior
    /// records must never be dropped.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be persisted.
    async fn append(&self, record: &ResultRecord) -> Result<(), StorageError>;

    /// All persisted attempts in insertion order.
    ///
    /// Returns an empty list when nothing has ever been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Corrupt` if the store exists but cannot be
    /// read back.
    async fn list_records(&self) -> Result<Vec<ResultRecord>, StorageError>;
}

/// In-memory repository for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    records: Arc<Mutex<Vec<ResultRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ResultRepository for InMemoryRepository {
    async fn append(&self, record: &ResultRecord) -> Result<(), StorageError> {
        let mut guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        guard.push(record.clone());
        Ok(())
    }

    async fn list_records(&self) -> Result<Vec<ResultRecord>, StorageError> {
        let guard = self
            .records
            .lock()
            .map_err(|e| StorageError::Io(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Distinct participant names across `records`, in first-appearance order.
///
/// Shared by read views so every backend reports participants the same way.
#[must_use]
pub fn distinct_participants(records: &[ResultRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for record in records {
        if seen.insert(record.name().to_owned()) {
            names.push(record.name().to_owned());
        }
    }
    names
}
