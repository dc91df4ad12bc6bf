//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_momentum-cli"))
        .env("MOMENTUM_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (code, stdout, stderr) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_status_on_first_run() {
    let dir = tempfile::tempdir().unwrap();
    let status = run_json(dir.path(), &["status"]);
    assert_eq!(status["momentum"], 50.0);
    assert_eq!(status["level"], "moderate");
    assert!(status["last_active_date"].is_null());
}

#[test]
fn test_complete_accumulates() {
    let dir = tempfile::tempdir().unwrap();
    let first = run_json(dir.path(), &["complete", "--priority", "high"]);
    assert_eq!(first["delta"], 25.0);
    assert_eq!(first["status"]["momentum"], 75.0);

    let second = run_json(dir.path(), &["complete", "-p", "low"]);
    assert_eq!(second["status"]["momentum"], 80.0);
    assert_eq!(second["status"]["level"], "excellent");
    assert_eq!(second["level_changed"], true);
    assert_eq!(second["status"]["today_completed_count"], 2);
}

#[test]
fn test_complete_reports_clamped_delta() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["complete", "-p", "high"]);
    run_json(dir.path(), &["complete", "-p", "high"]);
    // third completion earns 20 but only 10 fit under the cap
    let third = run_json(dir.path(), &["complete", "-p", "high"]);
    assert_eq!(third["delta"], 10.0);
    assert_eq!(third["status"]["momentum"], 100.0);
}

#[test]
fn test_complete_rejects_unknown_priority() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["complete", "--priority", "urgent"]);
    assert_ne!(code, 0);
}

#[test]
fn test_comeback_without_history_is_noop() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_json(dir.path(), &["comeback"]);
    assert_eq!(out["applied"], false);
    assert_eq!(out["status"]["momentum"], 50.0);
}

#[test]
fn test_rest_mark_and_clear() {
    let dir = tempfile::tempdir().unwrap();
    let marked = run_json(dir.path(), &["rest"]);
    assert_eq!(marked["status"]["rest_day_is_today"], true);
    assert_eq!(marked["marked"], marked["status"]["date"]);

    let cleared = run_json(dir.path(), &["rest", "--clear"]);
    assert_eq!(cleared["cleared"], marked["marked"]);
    assert!(cleared["status"]["rest_day_marker"].is_null());
}

#[test]
fn test_history_lists_newest_first() {
    let dir = tempfile::tempdir().unwrap();
    run_json(dir.path(), &["complete"]);
    run_json(dir.path(), &["rest"]);

    let history = run_json(dir.path(), &["history"]);
    let events = history.as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["type"], "RestDayMarked");
    assert_eq!(events[1]["type"], "CompletionRecorded");

    let limited = run_json(dir.path(), &["history", "--limit", "1"]);
    assert_eq!(limited.as_array().unwrap().len(), 1);
}

#[test]
fn test_decay_on_fresh_state() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_json(dir.path(), &["decay"]);
    assert!(out["change"].is_null());
    assert_eq!(out["days"].as_array().unwrap().len(), 0);
}

#[test]
fn test_config_set_and_get() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "scoring.high"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "15.0");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "scoring.high", "20"]);
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "scoring.high"]);
    assert_eq!(stdout.trim(), "20.0");

    let out = run_json(dir.path(), &["complete", "-p", "high"]);
    assert_eq!(out["delta"], 30.0);
}

#[test]
fn test_config_rejects_unknown_key() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "decay.nope", "1"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("decay.nope"));
}

#[test]
fn test_config_list_and_reset() {
    let dir = tempfile::tempdir().unwrap();
    let list = run_json(dir.path(), &["config", "list"]);
    assert_eq!(list["decay"]["weekday"], 5.0);

    run_cli(dir.path(), &["config", "set", "decay.weekday", "7"]);
    let (code, _, _) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let list = run_json(dir.path(), &["config", "list"]);
    assert_eq!(list["decay"]["weekday"], 5.0);
}
