//! Integration tests for the `watergate` CLI binary.
//!
//! Argument parsing, help output, config handling and offline webhook
//! decoding run without a device; the device commands run against a
//! wiremock server standing in for the valve.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `watergate` binary with env isolation.
///
/// Clears all `WATERGATE_*` env vars and points the config file into
/// `dir` so tests never touch the user's real configuration.
fn watergate_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("watergate");
    cmd.env("HOME", dir)
        .env("XDG_CONFIG_HOME", dir)
        .env("WATERGATE_CONFIG", dir.join("config.toml"))
        .env_remove("WATERGATE_PROFILE")
        .env_remove("WATERGATE_DEVICE")
        .env_remove("WATERGATE_OUTPUT")
        .env_remove("WATERGATE_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

/// Run the binary off the async runtime so the mock server keeps serving.
async fn run_blocking(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let dir = tempfile::tempdir().unwrap();
    let output = watergate_cmd(dir.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_lists_commands() {
    let dir = tempfile::tempdir().unwrap();
    watergate_cmd(dir.path()).arg("--help").assert().success().stdout(
        predicate::str::contains("state")
            .and(predicate::str::contains("telemetry"))
            .and(predicate::str::contains("auto-shut-off"))
            .and(predicate::str::contains("valve")),
    );
}

#[test]
fn test_version() {
    let dir = tempfile::tempdir().unwrap();
    watergate_cmd(dir.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_completions_bash() {
    let dir = tempfile::tempdir().unwrap();
    watergate_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("watergate"));
}

#[test]
fn test_invalid_valve_action() {
    let dir = tempfile::tempdir().unwrap();
    let output = watergate_cmd(dir.path())
        .args(["valve", "ajar"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
}

// ── Configuration ───────────────────────────────────────────────────

#[test]
fn test_no_device_configured() {
    let dir = tempfile::tempdir().unwrap();
    let output = watergate_cmd(dir.path()).arg("state").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("No device configured"),
        "Expected no-device error:\n{text}"
    );
}

#[test]
fn test_unknown_profile() {
    let dir = tempfile::tempdir().unwrap();
    let output = watergate_cmd(dir.path())
        .args(["--profile", "cellar", "state"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("cellar"));
}

#[test]
fn test_config_path_honors_flag() {
    let dir = tempfile::tempdir().unwrap();
    let custom = dir.path().join("custom.toml");
    watergate_cmd(dir.path())
        .arg("--config")
        .arg(&custom)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.toml"));
}

#[test]
fn test_set_device_then_show() {
    let dir = tempfile::tempdir().unwrap();
    watergate_cmd(dir.path())
        .args([
            "config",
            "set-device",
            "http://192.168.1.20",
            "--name",
            "basement",
            "--profile-timeout",
            "5",
            "--make-default",
        ])
        .assert()
        .success();

    assert!(dir.path().join("config.toml").exists());

    watergate_cmd(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("basement")
                .and(predicate::str::contains("http://192.168.1.20"))
                .and(predicate::str::contains("default_profile = \"basement\"")),
        );
}

// ── Webhook decoding (offline) ──────────────────────────────────────

#[test]
fn test_webhook_parse_file() {
    let dir = tempfile::tempdir().unwrap();
    let body = dir.path().join("event.json");
    std::fs::write(
        &body,
        r#"{"type":"valve","data":{"state":"closed"}}"#,
    )
    .unwrap();

    watergate_cmd(dir.path())
        .args(["-o", "json-compact", "webhook", "parse"])
        .arg(&body)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#"{"type":"valve","data":{"state":"closed"}}"#,
        ));
}

#[test]
fn test_webhook_parse_stdin_table() {
    let dir = tempfile::tempdir().unwrap();
    watergate_cmd(dir.path())
        .args(["webhook", "parse"])
        .write_stdin(r#"{"type":"wifi-changed","data":{"ssid":"Home","rssi":-61}}"#)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("wifi-changed")
                .and(predicate::str::contains("Home"))
                .and(predicate::str::contains("-61")),
        );
}

#[test]
fn test_webhook_parse_unknown_type() {
    let dir = tempfile::tempdir().unwrap();
    let output = watergate_cmd(dir.path())
        .args(["webhook", "parse"])
        .write_stdin(r#"{"type":"leak","data":{}}"#)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("leak"));
}

// ── Device commands ─────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_state_json_against_device() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sonic"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "valveState": "open",
            "waterFlowing": true,
            "powerSupply": "battery"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut cmd = watergate_cmd(dir.path());
    cmd.args(["--device", &server.uri(), "-o", "json-compact", "state"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(value["valveState"], "open");
    assert_eq!(value["waterFlowing"], true);
    assert_eq!(value["powerSupply"], "battery");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_valve_close_against_device() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/sonic/valve"))
        .and(body_json(json!({ "state": "closed" })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut cmd = watergate_cmd(dir.path());
    cmd.args(["--device", &server.uri(), "valve", "close"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_auto_shut_off_set_sends_only_given_fields() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/api/sonic/auto-shut-off"))
        .and(body_json(json!({ "enabled": false })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut cmd = watergate_cmd(dir.path());
    cmd.args([
        "--device",
        &server.uri(),
        "auto-shut-off",
        "set",
        "--enabled",
        "false",
    ]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_report_absent_prints_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sonic/auto-shut-off/report"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let mut cmd = watergate_cmd(dir.path());
    cmd.args(["--device", &server.uri(), "auto-shut-off", "report"]);
    let output = run_blocking(cmd).await;

    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(String::from_utf8_lossy(&output.stdout).contains("No auto shut-off"));
}
