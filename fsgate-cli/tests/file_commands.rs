//! Integration tests for upload, delete, mkdir, rename and move.

mod common;

use common::{exists, TestEnv};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_upload_writes_files() {
    let env = TestEnv::new();
    let a = env.local_file("a.txt", "alpha");
    let b = env.local_file("b.txt", "beta");

    let report = env.run_json(&[
        "upload",
        "inbox",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
    ]);

    assert_eq!(report["status"], "created");
    assert_eq!(report["target"], "inbox");
    assert_eq!(report["files"][0]["status"], "uploaded");
    assert_eq!(report["files"][1]["path"], "inbox/b.txt");
    assert_eq!(fs::read_to_string(env.path("inbox/a.txt")).unwrap(), "alpha");
    assert_eq!(fs::read_to_string(env.path("inbox/b.txt")).unwrap(), "beta");
}

#[test]
fn test_upload_with_rename() {
    let env = TestEnv::new();
    let local = env.local_file("local.bin", "data");

    env.command()
        .args(["upload", "", local.to_str().unwrap(), "--name", "stored.bin"])
        .assert()
        .success();

    assert!(env.path("stored.bin").is_file());
}

#[test]
fn test_upload_name_requires_single_file() {
    let env = TestEnv::new();
    let a = env.local_file("a.txt", "a");
    let b = env.local_file("b.txt", "b");

    env.command()
        .args(["upload", "", a.to_str().unwrap(), b.to_str().unwrap()])
        .args(["--name", "x"])
        .assert()
        .code(4);
}

#[test]
fn test_upload_partial_collision_succeeds() {
    let env = TestEnv::new();
    env.write("taken.txt", "old");
    let taken = env.local_file("taken.txt", "new");
    let fresh = env.local_file("fresh.txt", "fresh");

    let output = env
        .command()
        .args([
            "upload",
            "",
            taken.to_str().unwrap(),
            fresh.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["files"][0]["status"], "skipped");
    assert_eq!(report["files"][1]["status"], "uploaded");
    assert_eq!(fs::read_to_string(env.path("taken.txt")).unwrap(), "old");
}

#[test]
fn test_upload_all_skipped_exits_conflict() {
    let env = TestEnv::new();
    env.write("taken.txt", "old");
    let taken = env.local_file("taken.txt", "new");

    env.command()
        .args(["upload", "", taken.to_str().unwrap()])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"skipped\""));
}

#[test]
fn test_upload_over_limit_is_invalid() {
    let env = TestEnv::new();
    let big = env.local_file("big.txt", "0123456789");

    env.command()
        .args(["upload", "", big.to_str().unwrap(), "--max-bytes", "4"])
        .assert()
        .code(4)
        .stdout(predicate::str::contains("\"invalid\""));

    assert!(!exists(&env.path("big.txt")));
}

#[test]
fn test_upload_missing_local_file() {
    let env = TestEnv::new();

    env.command()
        .args(["upload", "", "/definitely/not/here.txt"])
        .assert()
        .code(5);
}

#[test]
fn test_mkdir_and_delete() {
    let env = TestEnv::new();

    let created = env.run_json(&["mkdir", "docs"]);
    assert_eq!(created["paths"], serde_json::json!(["docs"]));
    assert!(env.path("docs").is_dir());

    let deleted = env.run_json(&["delete", "docs"]);
    assert_eq!(deleted["paths"], serde_json::json!(["docs"]));
    assert!(!exists(&env.path("docs")));
}

#[test]
fn test_rename_in_place() {
    let env = TestEnv::new();
    env.write("dir/old.txt", "x");

    let outcome = env.run_json(&["rename", "dir/old.txt", "new.txt"]);

    assert_eq!(outcome["paths"], serde_json::json!(["dir/old.txt", "dir/new.txt"]));
    assert!(env.path("dir/new.txt").is_file());
    assert!(!exists(&env.path("dir/old.txt")));
}

#[test]
fn test_move_between_directories() {
    let env = TestEnv::new();
    env.write("inbox/a.txt", "x");
    fs::create_dir(env.path("archive")).unwrap();

    env.run_json(&["move", "inbox/a.txt", "archive/a.txt"]);

    assert!(env.path("archive/a.txt").is_file());
    assert!(!exists(&env.path("inbox/a.txt")));
}

#[test]
fn test_dry_run_reports_actions() {
    let env = TestEnv::new();
    env.write("a.txt", "x");

    let output = env
        .command()
        .args(["delete", "a.txt", "--dry-run"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let outcome: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(outcome["dry_run"], true);
    assert!(!outcome["actions"].as_array().unwrap().is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Dry run"));
    assert!(env.path("a.txt").is_file());
}
