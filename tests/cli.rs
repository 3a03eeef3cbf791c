#![cfg(feature = "cli")]

use std::process::Command;
use tempfile::TempDir;

fn run(args: &[&str]) -> std::process::Output {
    // Point at a file that doesn't exist so the user's own config never leaks in.
    let dir = TempDir::new().expect("failed to create temp dir");
    let config = dir.path().join("config.toml");
    Command::new(env!("CARGO_BIN_EXE_fieldlog"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .output()
        .expect("failed to run fieldlog")
}

#[test]
fn info_writes_logfmt_to_stdout() {
    let output = run(&["info", "service started", "port=8080"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("ts="), "{stdout}");
    assert!(
        stdout.ends_with("src=fieldlog level=info msg=\"service started\" port=8080\n"),
        "{stdout}"
    );
    assert!(!stdout.contains("caller="));
}

#[test]
fn name_and_format_overrides() {
    let output = run(&["--name", "deploy", "--format", "json", "warn", "disk low"]);
    assert!(output.status.success());
    let record: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is one JSON object");
    assert_eq!(record["src"], "deploy");
    assert_eq!(record["level"], "warn");
    assert_eq!(record["msg"], "disk low");
}

#[test]
fn level_override_filters() {
    let output = run(&["--level", "err", "info", "hidden"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn debug_is_filtered_by_default() {
    let output = run(&["debug", "noise"]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn fatal_exits_with_status_one() {
    let output = run(&["fatal", "unrecoverable"]);
    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("level=fatal msg=unrecoverable"), "{stdout}");
}

#[test]
fn caller_flag_adds_caller() {
    let output = run(&["--caller", "info", "x"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(" caller="));
}

#[test]
fn malformed_field_is_rejected() {
    let output = run(&["info", "msg", "novalue"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("expected KEY=VALUE"), "{stderr}");
}

#[test]
fn unknown_severity_is_rejected() {
    let output = run(&["verbose", "msg"]);
    assert!(!output.status.success());
}
