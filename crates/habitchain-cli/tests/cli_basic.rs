//! Basic CLI E2E tests.
//!
//! Each test points the binary at a throwaway config file so nothing under
//! the real home directory is touched.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

#[allow(deprecated)]
fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("habitchain-cli").unwrap();
    cmd.arg("--config").arg(dir.path().join("config.toml"));
    cmd
}

#[test]
fn test_cli_help() {
    let dir = TempDir::new().unwrap();
    cli(&dir).arg("--help").assert().success();
}

#[test]
fn test_session_scenario() {
    let dir = TempDir::new().unwrap();
    let script = "add \"Morning Workout\" --category fitness --difficulty medium\n\
                  complete 1\n\
                  connect\n\
                  claim\n\
                  wallet\n";
    let output = cli(&dir)
        .args(["session", "--seed", "7"])
        .write_stdin(script)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[3]["type"], "RewardClaimed");
    let balance = lines[4]["xlpr_balance"].as_f64().unwrap();
    assert!((balance - (127.5 + 2.46)).abs() < 1e-9);
}

#[test]
fn test_session_demo_flag_loads_samples() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["session", "--demo"])
        .write_stdin("list\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Read Technical Books"));
}

#[test]
fn test_demo_prints_report() {
    let dir = TempDir::new().unwrap();
    let output = cli(&dir).args(["demo", "--seed", "1"]).output().unwrap();
    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["events"].as_array().unwrap().len(), 3);
    assert_eq!(report["snapshot"]["wallet"]["connected"], true);
    assert_eq!(report["snapshot"]["claims"].as_array().unwrap().len(), 1);
}

#[test]
fn test_config_set_get_roundtrip() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["config", "set", "rewards.claim_multiplier", "2"])
        .assert()
        .success()
        .stdout("ok\n");
    cli(&dir)
        .args(["config", "get", "rewards.claim_multiplier"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("2"));
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["config", "get", "wallet.nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown key"));
}

#[test]
fn test_completions_bash() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("habitchain-cli"));
}
