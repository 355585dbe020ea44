//! In-memory weather store
//!
//! A process-local map backend with the same contract as the SQLite store.
//! Handy for embedding the cache without a database file and as a store
//! double in tests.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::{StoreError, WeatherStore};
use crate::data::WeatherRecord;

/// Weather store backed by a map behind a read-write lock
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, WeatherRecord>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WeatherStore for MemoryStore {
    async fn upsert(&self, record: WeatherRecord) -> Result<(), StoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        records.insert(record.location_key.clone(), record);
        Ok(())
    }

    async fn get(&self, location_key: &str) -> Result<Option<WeatherRecord>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        Ok(records.get(location_key).cloned())
    }

    async fn query_expired(&self, before: i64) -> Result<Vec<WeatherRecord>, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        Ok(records
            .values()
            .filter(|r| r.is_expired(before))
            .cloned()
            .collect())
    }

    async fn delete_batch(&self, records: &[WeatherRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut held = self
            .records
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        // The whole batch is removed under one write lock, so callers never
        // observe a partial delete
        for record in records {
            if held
                .get(&record.location_key)
                .is_some_and(|current| current.expires_at == record.expires_at)
            {
                held.remove(&record.location_key);
            }
        }

        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))?;

        Ok(records.len())
    }
}
