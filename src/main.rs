//! Weather cache maintenance CLI
//!
//! Thin binary over the library: opens the SQLite store and runs one
//! maintenance operation against it.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use weathercache::cli::{parse_payload_arg, Cli, Command};
use weathercache::data::{now_millis, WeatherRecord};
use weathercache::executor::TaskPool;
use weathercache::store::{SqliteStore, WeatherStore};
use weathercache::sweeper::ExpirySweeper;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    weathercache::logging::init()?;

    let cli = Cli::parse();
    let store: Arc<dyn WeatherStore> = Arc::new(SqliteStore::open(cli.store_config())?);

    match cli.command {
        Command::Sweep => {
            let pool = Arc::new(TaskPool::new(1));
            let sweeper = ExpirySweeper::new(Arc::clone(&store), pool);
            let removed = sweeper.sweep_expired(now_millis()).await?;
            println!("Removed {} expired record(s)", removed);
        }
        Command::Stats => {
            let total = store.count().await?;
            let expired = store.query_expired(now_millis()).await?.len();
            println!("{} record(s) cached, {} expired", total, expired);
        }
        Command::Put {
            location,
            ttl_minutes,
            payload,
        } => {
            let payload = parse_payload_arg(&payload)?;
            let record = WeatherRecord::new(
                location.clone(),
                payload,
                now_millis(),
                Duration::from_secs(ttl_minutes * 60),
            );
            store.upsert(record).await?;
            println!("Cached weather for {}", location);
        }
        Command::Get { location } => match store.get(&location).await? {
            Some(record) => println!("{}", serde_json::to_string_pretty(&record)?),
            None => println!("No cached record for {}", location),
        },
    }

    Ok(())
}
