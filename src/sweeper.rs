//! Background purge of expired weather records
//!
//! The sweeper runs once per storage-readiness signal: it queries the store
//! for every record past its expiry stamp and removes that set in a single
//! batch, on a background worker so the signaling path never waits on it.
//! A store that is unreachable when the signal fires abandons that sweep;
//! there is no retry.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::data::now_millis;
use crate::executor::TaskPool;
use crate::signal::ReadyWatcher;
use crate::store::{StoreError, WeatherStore};

/// Purges expired records from a weather store
pub struct ExpirySweeper {
    store: Arc<dyn WeatherStore>,
    pool: Arc<TaskPool>,
}

impl ExpirySweeper {
    /// Creates a sweeper over the given store and worker pool
    pub fn new(store: Arc<dyn WeatherStore>, pool: Arc<TaskPool>) -> Self {
        Self { store, pool }
    }

    /// Removes every record whose expiry stamp is at or before `now`
    ///
    /// Queries the stale set first and deletes exactly that set as one
    /// batch; when nothing has expired no delete is issued. A record
    /// written after the query snapshot is not touched.
    ///
    /// # Returns
    /// * `Ok(n)` - Number of records removed
    /// * `Err(StoreError)` - The store was unavailable or the batch failed
    pub async fn sweep_expired(&self, now: i64) -> Result<usize, StoreError> {
        sweep(Arc::clone(&self.store), now).await
    }

    /// Schedules one sweep for when storage first becomes ready
    ///
    /// The readiness callback only enqueues the sweep on the worker pool;
    /// whoever raised the signal never blocks on the sweep itself. The
    /// subscription detaches after the first observation, so repeated
    /// "ready" emissions cannot stack sweeps. Failures are logged and
    /// dropped; there is no retry.
    pub fn attach(&self, watcher: ReadyWatcher) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        let pool = Arc::clone(&self.pool);

        watcher.subscribe_once(move || {
            pool.submit(async move {
                match sweep(store, now_millis()).await {
                    Ok(_) => {}
                    Err(StoreError::Unavailable(reason)) => {
                        tracing::debug!(%reason, "Storage unavailable, expiry sweep abandoned");
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Expiry sweep failed");
                    }
                }
            });
        })
    }
}

async fn sweep(store: Arc<dyn WeatherStore>, now: i64) -> Result<usize, StoreError> {
    let expired = store.query_expired(now).await?;

    if expired.is_empty() {
        tracing::debug!(now, "No expired weather records");
        return Ok(0);
    }

    store.delete_batch(&expired).await?;

    tracing::info!(count = expired.len(), "Purged expired weather records");
    Ok(expired.len())
}
