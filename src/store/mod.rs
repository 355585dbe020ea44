//! Storage abstraction for cached weather records
//!
//! The store is an opaque table keyed by location: callers insert and read
//! whole records and the expiry sweeper asks for stale ones in bulk. Two
//! backends are provided, a SQLite file ([`SqliteStore`]) and an in-memory
//! map ([`MemoryStore`]). Consumers hold an explicit `Arc<dyn WeatherStore>`
//! handle; there is no process-global store.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StoreConfig};

use async_trait::async_trait;
use thiserror::Error;

use crate::data::WeatherRecord;

/// Errors that can occur when talking to a weather store
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store is not yet initialized or cannot be reached
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A batch delete did not remove the requested set
    #[error("batch delete failed for {expected} records: {reason}")]
    BatchDelete {
        /// Number of records the caller asked to remove
        expected: usize,
        /// What went wrong
        reason: String,
    },

    /// Underlying SQLite error
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Payload could not be serialized or deserialized
    #[error("payload error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error while opening or creating the store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// An opaque table of cached weather records keyed by location
///
/// `upsert` fully replaces any record already held for the same location;
/// records are never mutated in place. `delete_batch` removes the given set
/// as one operation: it either removes all of them or fails without leaving
/// a silent partial delete behind.
#[async_trait]
pub trait WeatherStore: Send + Sync {
    /// Inserts a record, replacing any existing record for its location
    async fn upsert(&self, record: WeatherRecord) -> Result<(), StoreError>;

    /// Returns the record cached for a location, if any
    async fn get(&self, location_key: &str) -> Result<Option<WeatherRecord>, StoreError>;

    /// Returns every record with `expires_at <= before`
    async fn query_expired(&self, before: i64) -> Result<Vec<WeatherRecord>, StoreError>;

    /// Removes exactly the given records as a single batch
    async fn delete_batch(&self, records: &[WeatherRecord]) -> Result<(), StoreError>;

    /// Total number of records currently held
    async fn count(&self) -> Result<usize, StoreError>;
}
