//! CLI precondition and exit-code tests. Every case here fails before the
//! first interactive prompt, so the binary can run without a terminal.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("fastapi-create").expect("binary should build");
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn invalid_project_name_exits_nonzero() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["create", "9lives"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn name_with_path_separator_is_rejected() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .args(["create", "nested/app"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Invalid project name"));
}

#[test]
fn existing_non_empty_directory_aborts() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("taken")).unwrap();
    std::fs::write(dir.path().join("taken/keep.txt"), "x").unwrap();

    cli(&dir)
        .args(["create", "taken"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("already exists and is not empty"));

    // Nothing was touched.
    assert!(dir.path().join("taken/keep.txt").is_file());
}

#[test]
fn file_target_aborts() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("blocked"), "x").unwrap();

    cli(&dir)
        .args(["create", "blocked"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is a file, not a directory"));
}

#[test]
fn help_lists_create_subcommand() {
    let dir = TempDir::new().unwrap();
    cli(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"));
}
