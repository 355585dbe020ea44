//! Core data model for cached weather records
//!
//! A [`WeatherRecord`] is one fetched weather result for a location, stamped
//! with the time it was fetched and the time it stops being valid. Records
//! are immutable once written; a newer fetch for the same location replaces
//! the whole record, and expiry deletes it.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A cached weather result for a single location
///
/// Timestamps are epoch milliseconds. The payload is an opaque JSON blob
/// (temperature, conditions, wind, place name and so on) whose shape is
/// owned by the fetch side; the cache never inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Identifier of the geographic location this record belongs to
    pub location_key: String,
    /// When the data was fetched, epoch milliseconds
    pub fetched_at: i64,
    /// When the record stops being valid, epoch milliseconds
    pub expires_at: i64,
    /// Opaque weather data blob
    pub payload: serde_json::Value,
}

impl WeatherRecord {
    /// Creates a record for a fetch that completed at `fetched_at`
    ///
    /// # Arguments
    /// * `location_key` - Identifier of the location the data was fetched for
    /// * `payload` - The fetched weather data
    /// * `fetched_at` - Fetch completion time, epoch milliseconds
    /// * `ttl` - How long the record stays valid
    pub fn new(
        location_key: impl Into<String>,
        payload: serde_json::Value,
        fetched_at: i64,
        ttl: Duration,
    ) -> Self {
        Self {
            location_key: location_key.into(),
            fetched_at,
            expires_at: fetched_at + ttl.as_millis() as i64,
            payload,
        }
    }

    /// Whether this record is stale at `now`
    ///
    /// A record is expired iff `expires_at <= now`; a record expiring
    /// exactly at `now` is already stale.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

/// Current time as epoch milliseconds
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
