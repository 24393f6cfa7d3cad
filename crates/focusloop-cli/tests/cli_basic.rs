//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against a throwaway data
//! directory, so they never touch real user state.

use std::path::Path;
use std::process::Command;

fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusloop-cli", "--quiet", "--"])
        .args(args)
        .env("FOCUSLOOP_DATA_DIR", data_dir)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_setup_and_status() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(dir.path(), &["timer", "setup", "25"]);
    assert_eq!(code, 0, "setup failed: {stderr}");

    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["status"], "idle");
    assert_eq!(snapshot["remaining_secs"], 1500);

    let (code, stdout, _) = run_cli(dir.path(), &["timer", "status"]);
    assert_eq!(code, 0);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["status"], "idle");
    assert_eq!(snapshot["session_index"], 0);
}

#[test]
fn test_start_pause_resume() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, _) = run_cli(dir.path(), &["timer", "setup", "25"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(dir.path(), &["timer", "start"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("TimerStarted"), "got: {stdout}");

    let (code, stdout, _) = run_cli(dir.path(), &["timer", "pause"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("TimerPaused"), "got: {stdout}");

    let (code, stdout, _) = run_cli(dir.path(), &["timer", "resume"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("TimerResumed"), "got: {stdout}");
}

#[test]
fn test_stop_moves_to_next_session() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["timer", "setup", "25"]);
    run_cli(dir.path(), &["timer", "start"]);

    let (code, stdout, _) = run_cli(dir.path(), &["timer", "stop"]);
    assert_eq!(code, 0);
    // Stop abandons the focus session and starts the following break.
    assert!(stdout.contains("TimerStopped"), "got: {stdout}");
    assert!(stdout.contains("TimerStarted"), "got: {stdout}");

    let (_, stdout, _) = run_cli(dir.path(), &["timer", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["session_index"], 1);
    assert_eq!(snapshot["kind"], "short_break");
}

#[test]
fn test_confirm_break_outside_prompt_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["timer", "setup", "25"]);

    let (code, stdout, _) = run_cli(dir.path(), &["timer", "confirm-break"]);
    assert_eq!(code, 0);
    // Nothing to confirm: the command just reports state.
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["status"], "idle");
}

#[test]
fn test_reset_returns_to_idle() {
    let dir = tempfile::tempdir().unwrap();
    run_cli(dir.path(), &["timer", "setup", "25"]);
    run_cli(dir.path(), &["timer", "start"]);
    run_cli(dir.path(), &["timer", "stop"]);

    let (code, stdout, _) = run_cli(dir.path(), &["timer", "reset"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("TimerReset"), "got: {stdout}");

    let (_, stdout, _) = run_cli(dir.path(), &["timer", "status"]);
    let snapshot: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(snapshot["status"], "idle");
    assert_eq!(snapshot["session_index"], 0);
    assert_eq!(snapshot["remaining_secs"], 1500);
}

#[test]
fn test_config_show_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(dir.path(), &["config", "show"]);
    assert_eq!(code, 0, "config show failed: {stderr}");
    assert!(stdout.contains("[cadence]"), "got: {stdout}");

    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "cadence.focus_secs"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1500");

    let (code, _, _) = run_cli(
        dir.path(),
        &["config", "set", "notifications.sound", "false"],
    );
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "notifications.sound"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "false");
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown config key"), "got: {stderr}");
}

#[test]
fn test_setup_zero_minutes_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["timer", "setup", "0"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("total duration"), "got: {stderr}");
}
