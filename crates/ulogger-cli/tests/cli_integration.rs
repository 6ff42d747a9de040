//! CLI Integration Tests
//!
//! These tests run the `ulogger` binary end-to-end and check both its
//! console output and the log file it writes.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

/// Create a CLI command running inside a temporary directory
fn cli_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ulogger").expect("Failed to find ulogger binary");
    cmd.current_dir(dir.path());
    cmd.env_remove("RUST_LOG");
    cmd
}

fn read_log(dir: &TempDir, file: &str) -> String {
    fs::read_to_string(dir.path().join(file)).expect("log file should exist")
}

// ============================================================================
// Levels Command Tests
// ============================================================================

#[test]
fn test_levels_command() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .arg("levels")
        .assert()
        .success()
        .stdout(predicate::str::contains("critical"))
        .stdout(predicate::str::contains("50"))
        .stdout(predicate::str::contains("debug"))
        .stdout(predicate::str::contains("10"));
}

// ============================================================================
// Run Command Tests
// ============================================================================

#[test]
fn test_run_writes_default_log_file() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["run", "12", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 -> 12"))
        .stdout(predicate::str::contains("30 -> 30"));

    let log = read_log(&dir, "ulog.log");
    assert_eq!(
        log.matches(" - UsefulLogger - INFO - parse_input() - Starting execution...")
            .count(),
        2
    );
    assert_eq!(
        log.matches(" - UsefulLogger - INFO - parse_input() - Execution ended").count(),
        2
    );
}

#[test]
fn test_run_failure_exits_with_error() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["--file", "fail.log", "run", "1", "abc", "2"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("1 -> 1"))
        .stdout(predicate::str::contains("2 -> 2").not())
        .stderr(predicate::str::contains("invalid digit found in string"));

    let log = read_log(&dir, "fail.log");
    assert!(log.contains("ERROR - parse_input() - A ParseIntError occurred."));
    assert!(log.contains("ParseIntError: invalid digit found in string"));
}

#[test]
fn test_run_without_reraise_continues() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["--strategy", "exception", "--no-reraise", "--file", "exc.log"])
        .args(["run", "7", "seven", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("seven -> suppressed"))
        .stdout(predicate::str::contains("8 -> 8"));

    let log = read_log(&dir, "exc.log");
    assert!(!log.contains("Starting execution..."));
    assert_eq!(log.matches("A ParseIntError occurred.").count(), 1);
}

#[test]
fn test_run_custom_name_and_level() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["--name", "parser", "--level", "error", "--file", "parser.log"])
        .args(["run", "5", "five"])
        .assert()
        .failure();

    let log = read_log(&dir, "parser.log");
    assert!(!log.contains("INFO"));
    assert!(log.contains(" - parser - ERROR - parse_input() - A ParseIntError occurred."));
}

#[test]
fn test_run_routes_cli_events_into_log() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["--file", "events.log", "run", "3"])
        .assert()
        .success();

    let log = read_log(&dir, "events.log");
    assert!(log.contains("INFO - Run finished"));
    assert!(log.contains("processed=1"));
}

#[test]
fn test_unknown_strategy_is_rejected() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["--strategy", "exe", "run", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exe"));

    assert!(!dir.path().join("ulog.log").exists());
}

// ============================================================================
// Config File Tests
// ============================================================================

#[test]
fn test_config_file_settings() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("ulogger.json"),
        r#"{"name": "from-config", "level": "debug", "file": "config.log"}"#,
    )
    .unwrap();

    cli_cmd(&dir)
        .args(["--config", "ulogger.json", "run", "4"])
        .assert()
        .success();

    let log = read_log(&dir, "config.log");
    assert!(log.contains(" - from-config - INFO - parse_input() - Execution ended"));
}

#[test]
fn test_flags_override_config_file() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("ulogger.json"),
        r#"{"name": "from-config", "file": "config.log"}"#,
    )
    .unwrap();

    cli_cmd(&dir)
        .args(["--config", "ulogger.json", "--name", "from-flag", "run", "4"])
        .assert()
        .success();

    let log = read_log(&dir, "config.log");
    assert!(log.contains(" - from-flag - INFO - "));
    assert!(!log.contains("from-config"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();

    cli_cmd(&dir)
        .args(["--config", "absent.json", "run", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config"));
}
