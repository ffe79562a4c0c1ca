// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 create-grandstack-app contributors

//! CLI surface tests
//!
//! Every case here fails before the pipeline starts, so no network access
//! happens and nothing is provisioned.

use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    Command::cargo_bin("create-grandstack-app").unwrap()
}

#[test]
fn test_missing_project_directory_exits_one() {
    cmd()
        .arg("--yes")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("No project directory specified"));
}

#[test]
fn test_unknown_flag_exits_one() {
    cmd()
        .args(["myapp", "--bogus"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("unexpected argument"));
}

#[test]
fn test_unknown_template_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .current_dir(dir.path())
        .args(["myapp", "vue", "--yes"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Unknown template"));
}

#[test]
fn test_non_empty_target_directory_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("myapp");
    std::fs::create_dir_all(&target).unwrap();
    std::fs::write(target.join("existing.txt"), "not empty").unwrap();

    cmd()
        .current_dir(dir.path())
        .args(["myapp", "--yes"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not empty"));
}

#[test]
fn test_help_exits_zero() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scaffold a GRANDstack"));
}
