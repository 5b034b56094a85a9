//! Integration tests for the `packlay` binary.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn packlay() -> Command {
    Command::cargo_bin("packlay").expect("binary builds")
}

fn project_with_sources() -> TempDir {
    let dir = TempDir::new().expect("tempdir");
    fs::create_dir_all(dir.path().join("src")).expect("mkdir src");
    fs::write(dir.path().join("src/index.js"), "export default {}\n").expect("write entry");
    fs::write(dir.path().join("index.html"), "<!doctype html>\n").expect("write template");
    dir
}

#[test]
fn development_mode_prints_descriptor_json() {
    let dir = project_with_sources();

    packlay()
        .arg("development")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"devtool\":\"inline-source-map\""))
        .stdout(predicate::str::contains("\"host\":\"0.0.0.0\""));
}

#[test]
fn production_mode_declares_compression_and_analyzer() {
    let dir = project_with_sources();

    packlay()
        .arg("production")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"plugin\":\"compression\""))
        .stdout(predicate::str::contains("\"plugin\":\"bundle-analyzer\""))
        .stdout(predicate::str::contains("devServer").not());
}

#[test]
fn pretty_flag_indents_output() {
    let dir = project_with_sources();

    packlay()
        .arg("development")
        .arg("--root")
        .arg(dir.path())
        .arg("--pretty")
        .assert()
        .success()
        .stdout(predicate::str::contains("  \"entry\""));
}

#[test]
fn output_is_parseable_json() {
    let dir = project_with_sources();

    let output = packlay()
        .arg("production")
        .arg("--root")
        .arg(dir.path())
        .output()
        .expect("run binary");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is one JSON document");
    assert_eq!(value["output"]["publicPath"], serde_json::json!("./"));
}

#[test]
fn unknown_mode_fails_with_usage_error() {
    packlay()
        .arg("staging")
        .assert()
        .failure()
        .stderr(predicate::str::contains("staging"));
}

#[test]
fn check_flag_rejects_project_without_entry() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("index.html"), "<!doctype html>\n").expect("write template");

    packlay()
        .arg("development")
        .arg("--root")
        .arg(dir.path())
        .arg("--check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("entry path not found"));
}

#[test]
fn without_check_missing_entry_still_composes() {
    let dir = TempDir::new().expect("tempdir");

    packlay()
        .arg("development")
        .arg("--root")
        .arg(dir.path())
        .assert()
        .success();
}
