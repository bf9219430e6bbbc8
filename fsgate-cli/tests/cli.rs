//! Integration tests for the fsgate CLI.
//!
//! These tests verify that the CLI binary behaves correctly, including
//! argument parsing, help text, and version output.

use assert_cmd::Command;
use predicates::prelude::*;

fn fsgate() -> Command {
    Command::cargo_bin("fsgate").expect("Failed to find fsgate binary")
}

/// Test that the binary runs without arguments and displays help/error.
#[test]
fn test_cli_no_arguments() {
    fsgate()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

/// Test that the --version flag displays version information.
#[test]
fn test_cli_version_flag() {
    fsgate()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fsgate"))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

/// Test that the --help flag lists every subcommand.
#[test]
fn test_cli_help_flag() {
    let assert = fsgate().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();

    assert!(stdout.contains("Usage:"));
    for command in [
        "upload",
        "delete",
        "mkdir",
        "rename",
        "move",
        "publish",
        "unpublish",
        "list-public",
        "show-config",
        "completions",
    ] {
        assert!(stdout.contains(command), "help is missing {command}");
    }
}

/// Test that an invalid subcommand produces an error.
#[test]
fn test_cli_invalid_subcommand() {
    fsgate()
        .arg("invalid-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

/// Test that missing positional arguments are rejected by the parser.
#[test]
fn test_cli_missing_arguments() {
    fsgate()
        .args(["rename", "only-one"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("NEW_NAME"));
}

/// Test that completions are generated for bash.
#[test]
fn test_completions_bash() {
    fsgate()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fsgate"));
}
