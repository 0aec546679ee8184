//! Integration tests for configuration layering.
//!
//! Tests the full priority chain: hardcoded defaults < XDG config < project config < CLI args

#![allow(clippy::unwrap_used)] // Test code uses unwrap for brevity
#![allow(deprecated)] // cargo_bin deprecation warning

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;

/// Get path to test fixtures
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("face-harmony-adapters/tests/fixtures")
}

#[test]
fn test_cli_threshold_validation_rejects_invalid() {
    let mut cmd = Command::cargo_bin("face-harmony").unwrap();
    cmd.arg("--min-score")
        .arg("101")
        .arg(fixtures_dir().join("harmonious.json"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("101 is not in 0.0..=100.0"));
}

#[test]
fn test_cli_threshold_validation_accepts_valid() {
    let mut cmd = Command::cargo_bin("face-harmony").unwrap();
    cmd.arg("--min-score")
        .arg("50")
        .arg(fixtures_dir().join("harmonious.json"));

    cmd.assert().code(0);
}

#[test]
fn test_project_config_applies_format() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join(".face-harmony.toml");

    // Create project config with JSON array format
    fs::write(
        &config_path,
        r"
[output]
format = 'json'
",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("face-harmony").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path()) // Isolate from user config
        .arg(fixtures_dir().join("harmonious.json"));

    // Output should be JSON array format per config
    cmd.assert()
        .code(0)
        .stdout(predicate::str::starts_with("[")); // JSON array format
}

#[test]
fn test_cli_overrides_project_config() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join(".face-harmony.toml");

    // Create project config with JSON array format
    fs::write(
        &config_path,
        r"
[output]
format = 'json'
",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("face-harmony").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .arg("--format")
        .arg("jsonl") // CLI overrides config
        .arg(fixtures_dir().join("harmonious.json"));

    // CLI --format jsonl should override config format = "json"
    cmd.assert()
        .code(0)
        .stdout(predicate::str::starts_with("{")); // JSONL format (single object per line)
}

#[test]
fn test_config_min_score_applies() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join(".face-harmony.toml");

    // The harmonious fixture hits 100 exactly, so any threshold passes
    fs::write(
        &config_path,
        r"
[general]
min_score = 90.0
",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("face-harmony").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .arg(fixtures_dir().join("harmonious.json"));

    cmd.assert().code(0);
}

#[test]
fn test_config_selects_curve_and_aggregation() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join(".face-harmony.toml");

    fs::write(
        &config_path,
        r"
[engine]
curve = 'exponential'
aggregation = 'weighted'
",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("face-harmony").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .arg(fixtures_dir().join("harmonious.json"));

    // The harmonious fixture scores ~100 under every curve and aggregation
    let output = cmd.output().unwrap();
    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().find(|l| !l.trim().is_empty()).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(line).unwrap();
    let final_score = parsed["final_score"].as_f64().unwrap();
    assert!(final_score > 99.99, "Expected ~100, got {final_score}");
}

#[test]
fn test_config_weights_table_used_for_weighted_aggregation() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join(".face-harmony.toml");

    // Custom weight table covering all eleven metrics
    fs::write(
        &config_path,
        r"
[engine]
aggregation = 'weighted'

[weights]
midface = 0.2
fwhr = 0.2
face_height = 0.1
es_ratio = 0.05
jaw_width = 0.1
nose_ratio = 0.05
nose_width = 0.05
nose_lips = 0.05
nose_chin = 0.05
chin_philtrum = 0.05
one_eye = 0.1
",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("face-harmony").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .arg(fixtures_dir().join("harmonious.json"));

    cmd.assert().code(0);
}

#[test]
fn test_config_invalid_weight_name_is_fatal() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join(".face-harmony.toml");

    fs::write(
        &config_path,
        r"
[engine]
aggregation = 'weighted'

[weights]
golden_ratio = 1.0
",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("face-harmony").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .arg(fixtures_dir().join("harmonious.json"));

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("golden_ratio"));
}

#[test]
fn test_invalid_config_file_is_skipped() {
    let temp_dir = tempfile::tempdir().unwrap();
    let config_path = temp_dir.path().join(".face-harmony.toml");

    fs::write(&config_path, "this is { not toml").unwrap();

    let mut cmd = Command::cargo_bin("face-harmony").unwrap();
    cmd.current_dir(temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .arg(fixtures_dir().join("harmonious.json"));

    // Invalid config is warned about and ignored, scoring proceeds
    cmd.assert().code(0);
}

#[test]
fn test_xdg_config_lower_priority_than_project() {
    let temp_dir = tempfile::tempdir().unwrap();

    // XDG config wants CSV output
    let xdg_dir = temp_dir.path().join("xdg/face-harmony");
    fs::create_dir_all(&xdg_dir).unwrap();
    fs::write(
        xdg_dir.join("config.toml"),
        r"
[output]
format = 'csv'
",
    )
    .unwrap();

    // Project config wants JSON output
    let project_dir = temp_dir.path().join("project");
    fs::create_dir_all(&project_dir).unwrap();
    fs::write(
        project_dir.join(".face-harmony.toml"),
        r"
[output]
format = 'json'
",
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("face-harmony").unwrap();
    cmd.current_dir(&project_dir)
        .env("XDG_CONFIG_HOME", temp_dir.path().join("xdg"))
        .arg(fixtures_dir().join("harmonious.json"));

    // Project config wins over XDG
    cmd.assert()
        .code(0)
        .stdout(predicate::str::starts_with("["));
}
