//! Command-line interface parsing for the weather cache maintenance tool
//!
//! This module handles parsing of CLI arguments using clap: the subcommands
//! for sweeping, inspecting and seeding the cache, plus the shared --db
//! override for the database location.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::store::StoreConfig;

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The --payload argument is not valid JSON
    #[error("Invalid payload JSON: {0}")]
    InvalidPayload(serde_json::Error),
}

/// Weather cache maintenance - sweep, inspect and seed cached weather records
#[derive(Parser, Debug)]
#[command(name = "weathercache")]
#[command(about = "Maintain the local weather record cache")]
#[command(version)]
pub struct Cli {
    /// Path to the cache database (defaults to the XDG cache directory)
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Maintenance operations on the cache
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Remove every record past its expiry timestamp
    Sweep,

    /// Show total and expired record counts
    Stats,

    /// Record a completed weather fetch for a location
    Put {
        /// Location the data was fetched for
        location: String,

        /// Minutes until the record expires
        #[arg(long, value_name = "MINUTES", default_value_t = 60)]
        ttl_minutes: u64,

        /// Weather payload as JSON
        #[arg(long, value_name = "JSON", default_value = "{}")]
        payload: String,
    },

    /// Print the cached record for a location
    Get {
        /// Location to look up
        location: String,
    },
}

impl Cli {
    /// Store configuration derived from the parsed arguments
    ///
    /// An explicit --db path wins; otherwise the default XDG location is
    /// used.
    pub fn store_config(&self) -> StoreConfig {
        match &self.db {
            Some(path) => StoreConfig {
                path: path.clone(),
                ..StoreConfig::default()
            },
            None => StoreConfig::default(),
        }
    }
}

/// Parses a --payload argument into a JSON value.
///
/// # Arguments
/// * `s` - The payload string from the CLI
///
/// # Returns
/// * `Ok(Value)` if the string is valid JSON
/// * `Err(CliError::InvalidPayload)` otherwise
pub fn parse_payload_arg(s: &str) -> Result<serde_json::Value, CliError> {
    serde_json::from_str(s).map_err(CliError::InvalidPayload)
}
