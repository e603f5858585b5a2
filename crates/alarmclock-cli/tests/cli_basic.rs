//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with a throwaway HOME so config writes stay
//! out of the real user directory.

use std::io::Write;
use std::process::{Command, Stdio};

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli_with_input(home: &std::path::Path, args: &[&str], input: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_alarmclock-cli"))
        .args(args)
        .env("HOME", home)
        .env_remove("ALARMCLOCK_ENV")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(input.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn run_cli(home: &std::path::Path, args: &[&str]) -> (i32, String, String) {
    run_cli_with_input(home, args, "")
}

#[test]
fn test_stopwatch_format() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["stopwatch", "format", "3661"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "01:01:01");

    let (_, stdout, _) = run_cli(home.path(), &["stopwatch", "format", "0"]);
    assert_eq!(stdout.trim(), "00:00:00");
}

#[test]
fn test_clock_once() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["clock"]);
    assert_eq!(code, 0, "Clock failed");
    let line = stdout.trim();
    assert!(line.contains("AM") || line.contains("PM"), "unexpected clock line: {line}");
    assert!(line.contains(", "), "missing date: {line}");
}

#[test]
fn test_clock_json() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["clock", "--json"]);
    assert_eq!(code, 0, "Clock JSON failed");
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["type"], "clock_updated");
    assert!(parsed["time"].as_str().unwrap().len() == "07:05:09 PM".len());
}

#[test]
fn test_alarm_invalid_time() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, stderr) = run_cli(home.path(), &["alarm", "set", "seven", "30"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("Invalid Time: Please enter a valid time."));
    assert!(stderr.contains("error: hour 'seven' is not a number"));
}

#[test]
fn test_alarm_out_of_range() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["alarm", "set", "13", "00", "--meridiem", "pm"]);
    assert_eq!(code, 1);
    assert!(stdout.contains("Invalid Time"));
}

#[test]
fn test_stopwatch_run_reset_and_quit() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) =
        run_cli_with_input(home.path(), &["stopwatch", "run", "--json"], "start\nreset\nquit\n");
    assert_eq!(code, 0, "Stopwatch run failed");

    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    let last = events.last().expect("at least one event");
    assert_eq!(last["type"], "stopwatch_updated");
    assert_eq!(last["display"], "00:00:00");
    assert_eq!(last["running"], true);
}

#[test]
fn test_run_exits_on_eof() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli_with_input(home.path(), &["run", "--json"], "alarm 7 30 pm\n");
    assert_eq!(code, 0);
    assert!(stdout.contains("\"alarm_armed\""));
}

#[test]
fn test_config_set_get_reset() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "notifications.bell"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "true");

    let (code, _, _) = run_cli(home.path(), &["config", "set", "notifications.bell", "false"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "notifications.bell"]);
    assert_eq!(stdout.trim(), "false");

    let (code, _, _) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "notifications.bell"]);
    assert_eq!(stdout.trim(), "true");
}

#[test]
fn test_config_rejects_bad_values() {
    let home = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["config", "set", "clock.time_format", "%Q"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("clock.time_format"));

    let (code, _, _) = run_cli(home.path(), &["config", "get", "clock.nope"]);
    assert_eq!(code, 1);
}

#[test]
fn test_completions() {
    let home = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("alarmclock-cli"));
}
