//! CLI integration tests.

mod support;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value as Json;

use support::config::write_temp_config;

fn harness() -> Command {
    let mut cmd = cargo_bin_cmd!("callback-harness");
    cmd.env_remove("CALLBACK_HARNESS_TIMEOUT_MS")
        .env_remove("RUST_LOG");
    cmd
}

fn last_json_line(stdout: &[u8]) -> Json {
    let text = String::from_utf8_lossy(stdout);
    let line = text
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())
        .expect("stdout should not be empty");
    serde_json::from_str(line).expect("last line should be JSON")
}

#[test]
fn test_help() {
    harness()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("scenarios"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version() {
    harness()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("callback-harness"));
}

#[test]
fn test_scenarios_list() {
    harness()
        .arg("scenarios")
        .assert()
        .success()
        .stdout(predicate::str::contains("video_quality_changed"))
        .stdout(predicate::str::contains("conferenceable_connections_changed"))
        .stdout(predicate::str::contains("silence"));
}

#[test]
fn test_scenarios_list_json() {
    let output = harness().args(["scenarios", "--json"]).output().unwrap();
    assert!(output.status.success());

    let json = last_json_line(&output.stdout);
    assert_eq!(json["command"], "scenarios");
    assert_eq!(json["scenarios"].as_array().map(Vec::len), Some(23));
}

#[test]
fn test_run_selected_scenarios_inline() {
    let dir = tempfile::tempdir().unwrap();
    harness()
        .args(["run", "--delivery", "inline", "--silence-ms", "20"])
        .args(["-s", "destroyed", "-s", "silence", "-c"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("destroyed"))
        .stdout(predicate::str::contains("pass"));
}

#[test]
fn test_run_whole_catalog_on_worker_json() {
    let dir = tempfile::tempdir().unwrap();
    let output = harness()
        .args(["run", "--json", "--silence-ms", "20", "-c"])
        .arg(dir.path().join("absent.toml"))
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let report = last_json_line(&output.stdout);
    assert_eq!(report["command"], "run");
    assert_eq!(report["delivery"], "worker");
    assert_eq!(report["failed"], 0);
    assert_eq!(report["passed"], 23);
    assert!(report["run_id"].as_str().is_some());
}

#[test]
fn test_run_unknown_scenario_fails() {
    let dir = tempfile::tempdir().unwrap();
    harness()
        .args(["run", "-s", "no_such_scenario", "-c"])
        .arg(dir.path().join("absent.toml"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unknown scenario"));
}

#[test]
fn test_config_init_then_validate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("harness.toml");

    harness()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    harness()
        .args(["config", "validate", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn test_config_validate_rejects_zero_timeout() {
    let (_dir, path) = write_temp_config("[wait]\ntimeout_ms = 0\n");

    harness()
        .args(["config", "validate", "-c"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("wait.timeout_ms"));
}

#[test]
fn test_config_show_applies_env_override() {
    let (_dir, path) = write_temp_config("[delivery]\nkind = \"tokio\"\n");

    let output = harness()
        .env("CALLBACK_HARNESS_TIMEOUT_MS", "1234")
        .args(["config", "show", "--json", "-c"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json = last_json_line(&output.stdout);
    assert_eq!(json["config"]["wait"]["timeout_ms"], 1234);
    assert_eq!(json["config"]["delivery"]["kind"], "tokio");
    assert_eq!(json["config"]["delivery"]["thread_name"], "CallbackThread");
}
