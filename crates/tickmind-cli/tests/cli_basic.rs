//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. All commands
//! run with TICKMIND_ENV=dev so the real config is left alone.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "tickmind-cli", "--"])
        .args(args)
        .env("TICKMIND_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_help() {
    let (stdout, _, code) = run_cli(&["--help"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("interval reminder"));
}

#[test]
fn test_config_list_is_json() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("config list should print JSON");
    assert!(parsed.get("interval_minutes").is_some());
}

#[test]
fn test_config_set_then_get() {
    let (_, _, code) = run_cli(&["config", "set", "interval_minutes", "0.5"]);
    assert_eq!(code, 0, "config set failed");

    let (stdout, _, code) = run_cli(&["config", "get", "interval_minutes"]);
    assert_eq!(code, 0, "config get failed");
    assert_eq!(stdout.trim(), "0.5");
}

#[test]
fn test_config_set_rejects_negative_interval() {
    let (_, stderr, code) = run_cli(&["config", "set", "interval_minutes", "-3"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("interval_minutes"));
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, stderr, code) = run_cli(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}
