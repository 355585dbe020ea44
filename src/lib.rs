//! Expiry cache core for fetched weather data
//!
//! Weather results are cached as [`data::WeatherRecord`]s with a hard
//! expiry stamp. A [`store::WeatherStore`] holds them (SQLite file or
//! in-memory map), and the [`sweeper::ExpirySweeper`] purges the stale set
//! in one batch on a background worker, triggered once by the
//! [`signal::ReadySignal`] that announces storage initialization.

pub mod cli;
pub mod data;
pub mod executor;
pub mod logging;
pub mod signal;
pub mod store;
pub mod sweeper;
