//! SQLite-backed weather store
//!
//! Persists records in a single `weather` table keyed by location. The
//! database lives in the XDG cache directory by default and is opened in
//! WAL mode for better concurrency.

use rusqlite::{params, Connection};
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use directories::ProjectDirs;

use super::{StoreError, WeatherStore};
use crate::data::WeatherRecord;

/// Store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub path: PathBuf,

    /// Enable WAL mode for better concurrency
    pub wal_mode: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        // XDG cache dir (~/.cache/weathercache on Linux), falling back to
        // the working directory when no home is available
        let path = ProjectDirs::from("", "", "weathercache")
            .map(|dirs| dirs.cache_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("weather.db");

        Self {
            path,
            wal_mode: true,
        }
    }
}

/// SQLite store for weather records
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens or creates the database at the configured path
    ///
    /// Creates parent directories as needed and initializes the schema.
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        if let Some(parent) = config.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        tracing::info!(path = %config.path.display(), "Opening weather cache database");

        let conn = Connection::open(&config.path)?;

        if config.wal_mode {
            conn.pragma_update(None, "journal_mode", "WAL")?;
        }

        let store = Self {
            conn: Mutex::new(conn),
        };
        store.init_schema()?;

        Ok(store)
    }

    /// Opens the database at the default XDG cache path
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(StoreConfig::default())
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<(), StoreError> {
        self.lock_conn()?.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS weather (
                location_key TEXT PRIMARY KEY,
                fetched_at INTEGER NOT NULL,
                expires_at INTEGER NOT NULL,
                payload TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_weather_expires_at ON weather(expires_at);
            "#,
        )?;

        Ok(())
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

#[async_trait]
impl WeatherStore for SqliteStore {
    async fn upsert(&self, record: WeatherRecord) -> Result<(), StoreError> {
        let payload = serde_json::to_string(&record.payload)?;

        self.lock_conn()?.execute(
            r#"
            INSERT OR REPLACE INTO weather (location_key, fetched_at, expires_at, payload)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                &record.location_key,
                record.fetched_at,
                record.expires_at,
                payload,
            ],
        )?;

        tracing::debug!(location = %record.location_key, "Stored weather record");
        Ok(())
    }

    async fn get(&self, location_key: &str) -> Result<Option<WeatherRecord>, StoreError> {
        let row: Option<(String, i64, i64, String)> = {
            let conn = self.lock_conn()?;
            let mut stmt = conn.prepare(
                "SELECT location_key, fetched_at, expires_at, payload
                 FROM weather WHERE location_key = ?1",
            )?;

            let mut rows = stmt.query_map(params![location_key], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?;

            rows.next().transpose()?
        };

        match row {
            Some((location_key, fetched_at, expires_at, payload)) => Ok(Some(WeatherRecord {
                location_key,
                fetched_at,
                expires_at,
                payload: serde_json::from_str(&payload)?,
            })),
            None => Ok(None),
        }
    }

    async fn query_expired(&self, before: i64) -> Result<Vec<WeatherRecord>, StoreError> {
        let rows: Vec<(String, i64, i64, String)> = {
            let conn = self.lock_conn()?;
            let mut stmt = conn.prepare(
                "SELECT location_key, fetched_at, expires_at, payload
                 FROM weather WHERE expires_at <= ?1",
            )?;

            let mapped = stmt.query_map(params![before], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
            })?;

            mapped.collect::<Result<_, _>>()?
        };

        let mut records = Vec::with_capacity(rows.len());
        for (location_key, fetched_at, expires_at, payload) in rows {
            records.push(WeatherRecord {
                location_key,
                fetched_at,
                expires_at,
                payload: serde_json::from_str(&payload)?,
            });
        }

        tracing::debug!(count = records.len(), before, "Queried expired records");
        Ok(records)
    }

    async fn delete_batch(&self, records: &[WeatherRecord]) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let conn = self.lock_conn()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| StoreError::BatchDelete {
                expected: records.len(),
                reason: e.to_string(),
            })?;

        for record in records {
            // Match on the expiry stamp too: a record replaced by a newer
            // fetch since the query snapshot is left alone
            tx.execute(
                "DELETE FROM weather WHERE location_key = ?1 AND expires_at = ?2",
                params![&record.location_key, record.expires_at],
            )
            .map_err(|e| StoreError::BatchDelete {
                expected: records.len(),
                reason: e.to_string(),
            })?;
        }

        tx.commit().map_err(|e| StoreError::BatchDelete {
            expected: records.len(),
            reason: e.to_string(),
        })?;

        tracing::debug!(count = records.len(), "Deleted record batch");
        Ok(())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let count: i64 =
            self.lock_conn()?
                .query_row("SELECT COUNT(*) FROM weather", [], |row| row.get(0))?;

        Ok(count as usize)
    }
}
