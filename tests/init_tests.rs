//! Integration tests for init, config and theme commands

#![allow(deprecated)]

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

mod common;
use common::timegrid_cmd;

fn init_sheet(temp: &TempDir) {
    timegrid_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--user")
        .arg("ada")
        .assert()
        .success();
}

#[test]
fn test_init_creates_config() {
    let temp = TempDir::new().unwrap();

    timegrid_cmd()
        .arg("init")
        .arg(temp.path())
        .arg("--user")
        .arg("ada")
        .assert()
        .success()
        .stdout(predicate::str::contains("User: ada"));

    let content = fs::read_to_string(temp.path().join(".timegrid/config.toml")).unwrap();
    assert!(content.contains("user = \"ada\""));
    assert!(content.contains("workday_hours = 7.0"));
}

#[test]
fn test_init_already_initialized_fails() {
    let temp = TempDir::new().unwrap();
    init_sheet(&temp);

    timegrid_cmd().arg("init").arg(temp.path()).assert().failure();
}

#[test]
fn test_command_outside_timesheet_fails() {
    let temp = TempDir::new().unwrap();

    timegrid_cmd()
        .current_dir(temp.path())
        .arg("list")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("timegrid init"));
}

#[test]
fn test_config_get_and_set() {
    let temp = TempDir::new().unwrap();
    init_sheet(&temp);

    timegrid_cmd()
        .current_dir(temp.path())
        .args(["config", "workday_hours", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Set workday_hours = 8"));

    timegrid_cmd()
        .current_dir(temp.path())
        .args(["config", "workday_hours"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8"));
}

#[test]
fn test_config_rejects_read_only_key() {
    let temp = TempDir::new().unwrap();
    init_sheet(&temp);

    timegrid_cmd()
        .current_dir(temp.path())
        .args(["config", "created", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("read-only"));
}

#[test]
fn test_root_from_environment() {
    let temp = TempDir::new().unwrap();
    let elsewhere = TempDir::new().unwrap();
    init_sheet(&temp);

    timegrid_cmd()
        .current_dir(elsewhere.path())
        .env("TIMEGRID_ROOT", temp.path())
        .args(["config", "user"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ada"));
}

#[test]
fn test_theme_is_listed() {
    let temp = TempDir::new().unwrap();
    init_sheet(&temp);

    timegrid_cmd()
        .current_dir(temp.path())
        .args(["theme", "T1", "Development", "--color", "#00aa00"])
        .assert()
        .success();

    timegrid_cmd()
        .current_dir(temp.path())
        .args(["config", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("theme T1 = Development (#00aa00)"));
}
