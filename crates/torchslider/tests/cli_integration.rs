//! Integration tests for the `torchslider` binary.
//!
//! These tests exercise the CLI via `assert_cmd`, verifying that basic
//! subcommands (help, version, config, sources, action, watch) produce the
//! expected output. Hardware-touching paths run in their degraded no-torch
//! form on test hosts.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

fn cli() -> assert_cmd::Command {
    cargo_bin_cmd!("torchslider")
}

#[test]
fn cli_help_succeeds() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("torchslider"));
}

#[test]
fn cli_version_prints_version() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── config ──

#[test]
fn cli_config_succeeds() {
    cli()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("blink_interval_ms"));
}

#[test]
fn cli_config_json_produces_valid_json() {
    let output = cli()
        .args(["--json", "config"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("config --json should produce valid JSON");
    assert!(
        json["settings"].is_object(),
        "JSON output should contain 'settings' object"
    );
    assert_eq!(json["settings"]["facing"], "back");
}

#[test]
fn cli_config_honors_custom_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "blink_interval_ms = 123\nfacing = \"front\"\n").unwrap();

    let output = cli()
        .args(["--json", "--config", path.to_str().unwrap(), "config"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["settings"]["blink_interval_ms"], 123);
    assert_eq!(json["settings"]["facing"], "front");
    assert_eq!(json["config_file_exists"], true);
}

#[test]
fn cli_config_reports_validation_problems() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "facing = \"sideways\"\n").unwrap();

    cli()
        .args(["--config", path.to_str().unwrap(), "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid facing"));
}

// ── sources ──

#[test]
fn cli_sources_succeeds() {
    cli().arg("sources").assert().success();
}

#[test]
fn cli_sources_json_produces_valid_json() {
    let output = cli()
        .args(["--json", "sources"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("sources --json should produce valid JSON");
    assert!(json["count"].is_number());
    assert!(json["sources"].is_array());
}

// ── action ──

#[test]
fn cli_action_unknown_code_fails() {
    cli()
        .args(["action", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown slider action code: 99"));
}

#[test]
fn cli_action_help_names_the_codes() {
    cli()
        .args(["action", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20=off"));
}

// ── watch ──

#[test]
fn cli_watch_empty_stdin_exits_cleanly() {
    cli()
        .arg("watch")
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("Done."));
}

#[test]
fn cli_watch_dispatches_and_rejects_codes() {
    cli()
        .arg("watch")
        .write_stdin("21\n99\nbogus\n20\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("99 ignored"))
        .stdout(predicate::str::contains("\"bogus\" ignored"));
}

// ── torch ──

#[test]
fn cli_torch_help_succeeds() {
    cli()
        .args(["torch", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("on or off"));
}
