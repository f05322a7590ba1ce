//! Binary-level integration tests.
//!
//! The build engine is stubbed with shell one-liners that emit the JSON
//! protocol, so these run without any real bundler installed.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("drover")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("dev"));
}

#[test]
fn build_requires_valid_config_path() {
    Command::cargo_bin("drover")
        .unwrap()
        .args(["build", "--config", "/nonexistent/drover.config.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Config file not found"));
}

#[cfg(unix)]
fn write_stub_config(dir: &TempDir, result_json: &str) {
    let config = serde_json::json!({
        "engine": {
            "command": "sh",
            "args": ["-c", format!("echo '{}'", result_json)]
        }
    });
    fs::write(
        dir.path().join("drover.config.json"),
        serde_json::to_string(&config).unwrap(),
    )
    .unwrap();
}

#[cfg(unix)]
#[test]
fn build_success_prints_green_line_and_stats() {
    let temp = TempDir::new().unwrap();
    write_stub_config(
        &temp,
        r#"{"errors":[],"warnings":[],"stats":"assets: 2, time: 120ms"}"#,
    );

    Command::cargo_bin("drover")
        .unwrap()
        .arg("build")
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Compile successfully!"))
        .stderr(predicate::str::contains("assets: 2, time: 120ms"));
}

#[cfg(unix)]
#[test]
fn build_failure_prints_red_line_and_first_error() {
    let temp = TempDir::new().unwrap();
    write_stub_config(
        &temp,
        r#"{"errors":["Module not found: ./x","second error"],"warnings":[]}"#,
    );

    Command::cargo_bin("drover")
        .unwrap()
        .arg("build")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Compile failed!"))
        .stderr(predicate::str::contains("Module not found: ./x"))
        .stderr(predicate::str::contains("second error").not());
}

#[cfg(unix)]
#[test]
fn build_warnings_prints_yellow_line_and_guidance() {
    let temp = TempDir::new().unwrap();
    write_stub_config(&temp, r#"{"errors":[],"warnings":["unused var y"]}"#);

    Command::cargo_bin("drover")
        .unwrap()
        .arg("build")
        .current_dir(temp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Compile completes with warnings."))
        .stderr(predicate::str::contains("unused var y"))
        .stderr(predicate::str::contains(
            "Search for the keywords to learn more about each warning.",
        ))
        .stderr(predicate::str::contains("eslint-disable-next-line"));
}

#[cfg(unix)]
#[test]
fn build_engine_fatal_is_reported_and_nonzero() {
    let temp = TempDir::new().unwrap();
    let config = serde_json::json!({
        "engine": {
            "command": "sh",
            "args": ["-c", "echo 'engine exploded' >&2; exit 2"]
        }
    });
    fs::write(
        temp.path().join("drover.config.json"),
        serde_json::to_string(&config).unwrap(),
    )
    .unwrap();

    Command::cargo_bin("drover")
        .unwrap()
        .arg("build")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Compile failed!"))
        .stderr(predicate::str::contains("engine exploded"));
}

#[cfg(unix)]
#[test]
fn build_engine_missing_reports_launch_failure() {
    let temp = TempDir::new().unwrap();
    let config = serde_json::json!({
        "engine": { "command": "definitely-not-a-real-bundler-xyz", "args": [] }
    });
    fs::write(
        temp.path().join("drover.config.json"),
        serde_json::to_string(&config).unwrap(),
    )
    .unwrap();

    Command::cargo_bin("drover")
        .unwrap()
        .arg("build")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to launch build engine"));
}
