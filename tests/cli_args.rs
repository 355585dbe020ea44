//! Integration tests for CLI argument handling
//!
//! Runs the weathercache binary against a temporary database and checks
//! the maintenance subcommands end to end.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_weathercache"))
        .args(args)
        .output()
        .expect("Failed to execute weathercache")
}

fn db_arg(dir: &Path) -> String {
    dir.join("weather.db").to_string_lossy().into_owned()
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("weathercache"),
        "Help should mention weathercache"
    );
    assert!(stdout.contains("sweep"), "Help should mention sweep");
}

#[test]
fn test_unknown_subcommand_fails() {
    let output = run_cli(&["vacuum"]);
    assert!(!output.status.success(), "Unknown subcommand should fail");
}

#[test]
fn test_sweep_on_empty_database_reports_zero() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_arg(temp_dir.path());

    let output = run_cli(&["sweep", "--db", &db]);

    assert!(output.status.success(), "Sweep should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Removed 0"),
        "Empty database sweep should remove nothing: {}",
        stdout
    );
}

#[test]
fn test_put_then_get_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_arg(temp_dir.path());

    let put = run_cli(&[
        "put",
        "vancouver",
        "--db",
        &db,
        "--payload",
        r#"{"temperature": 21.0}"#,
    ]);
    assert!(put.status.success(), "Put should succeed");

    let get = run_cli(&["get", "vancouver", "--db", &db]);
    assert!(get.status.success(), "Get should succeed");
    let stdout = String::from_utf8_lossy(&get.stdout);
    assert!(stdout.contains("vancouver"));
    assert!(stdout.contains("21.0"));
}

#[test]
fn test_get_missing_location_reports_no_record() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_arg(temp_dir.path());

    let output = run_cli(&["get", "nowhere", "--db", &db]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No cached record"));
}

#[test]
fn test_stats_counts_cached_records() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_arg(temp_dir.path());

    run_cli(&["put", "vancouver", "--db", &db]);
    run_cli(&["put", "burnaby", "--db", &db]);

    let output = run_cli(&["stats", "--db", &db]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("2 record(s) cached"),
        "Stats should count both records: {}",
        stdout
    );
}

#[test]
fn test_put_invalid_payload_prints_error_and_exits() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_arg(temp_dir.path());

    let output = run_cli(&["put", "vancouver", "--db", &db, "--payload", "{ not json }"]);

    assert!(!output.status.success(), "Invalid payload should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid payload"),
        "Should print error message about invalid payload: {}",
        stderr
    );
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use std::path::PathBuf;
    use weathercache::cli::{Cli, Command};

    #[test]
    fn test_cli_sweep_parses() {
        let cli = Cli::parse_from(["weathercache", "sweep"]);
        assert!(matches!(cli.command, Command::Sweep));
    }

    #[test]
    fn test_cli_db_flag_accepted_after_subcommand() {
        let cli = Cli::parse_from(["weathercache", "stats", "--db", "/tmp/w.db"]);
        assert_eq!(cli.db, Some(PathBuf::from("/tmp/w.db")));
    }

    #[test]
    fn test_cli_put_requires_location() {
        let result = Cli::try_parse_from(["weathercache", "put"]);
        assert!(result.is_err());
    }
}
