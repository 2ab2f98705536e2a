//! End-to-end tests of the taskr binary

mod common;

use assert_cmd::Command;
use common::{at, base_time, write_file_at};
use predicates::prelude::*;

const CONFIG: &str = r#"
vars:
  WHO: world

tasks:
  greet:
    usage: Say hello
    cmds:
      - echo "hello ${WHO}"

  build:
    usage: Copy the input
    sources: [in.txt]
    generates: [out.txt]
    cmds:
      - cp in.txt out.txt

  hidden:
    private: true
    cmds: echo hidden
"#;

fn taskr() -> Command {
    Command::cargo_bin("taskr").unwrap()
}

#[test]
fn test_runs_task() {
    let (_temp_dir, config_path) = common::create_test_config(CONFIG);

    taskr()
        .arg("--file")
        .arg(&config_path)
        .arg("greet")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello world"));
}

#[test]
fn test_assignments_override_vars() {
    let (_temp_dir, config_path) = common::create_test_config(CONFIG);

    taskr()
        .arg("--file")
        .arg(&config_path)
        .args(["greet", "WHO=there"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello there"));
}

#[test]
fn test_finds_config_in_current_dir() {
    let (temp_dir, _config_path) = common::create_test_config(CONFIG);

    taskr()
        .current_dir(temp_dir.path())
        .arg("greet")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello world"));
}

#[test]
fn test_help_lists_public_tasks() {
    let (_temp_dir, config_path) = common::create_test_config(CONFIG);

    taskr()
        .arg("--file")
        .arg(&config_path)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("greet"))
        .stdout(predicate::str::contains("Copy the input"))
        .stdout(predicate::str::contains("hidden").not());
}

#[test]
fn test_status_exit_code() {
    let (temp_dir, config_path) = common::create_test_config(CONFIG);
    let base = base_time();
    write_file_at(&temp_dir.path().join("in.txt"), at(base, 10));

    taskr()
        .arg("--file")
        .arg(&config_path)
        .args(["--status", "build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not up to date"));

    write_file_at(&temp_dir.path().join("out.txt"), at(base, 20));

    taskr()
        .arg("--file")
        .arg(&config_path)
        .args(["--status", "build"])
        .assert()
        .success();
}

#[test]
fn test_dry_prints_without_running() {
    let (temp_dir, config_path) = common::create_test_config(CONFIG);
    write_file_at(&temp_dir.path().join("in.txt"), at(base_time(), 10));

    taskr()
        .arg("--file")
        .arg(&config_path)
        .args(["--dry", "build"])
        .assert()
        .success()
        .stderr(predicate::str::contains("cp in.txt out.txt"));

    assert!(!temp_dir.path().join("out.txt").exists());
}

#[test]
fn test_missing_config() {
    let temp_dir = tempfile::TempDir::new().unwrap();

    taskr()
        .arg("--file")
        .arg(temp_dir.path().join("nope.yml"))
        .arg("greet")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}
