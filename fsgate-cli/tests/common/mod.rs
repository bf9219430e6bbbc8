//! Common test utilities for CLI integration tests.
//!
//! This module provides shared helpers for CLI testing, including:
//! - An isolated environment with its own root, public root and home
//! - Command builders with the roots pre-configured
//! - JSON output parsing

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with isolated roots and home directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Primary root passed with `--root`
    pub root: PathBuf,
    /// Public root passed with `--public-root`
    pub public: PathBuf,
    /// Home directory seen by the binary, so no real user config is read
    pub home: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment with empty roots.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let root = base.join("root");
        let public = base.join("public");
        let home = base.join("home");
        for dir in [&root, &public, &home] {
            fs::create_dir_all(dir).expect("Failed to create test directory");
        }

        Self {
            temp_dir,
            root,
            public,
            home,
        }
    }

    /// Get a bare command builder without root flags.
    ///
    /// The environment is still isolated: `HOME` points at the test home and
    /// inherited `FSGATE_*` variables are removed.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("fsgate").expect("Failed to find fsgate binary");
        cmd.env("HOME", &self.home);
        for var in [
            "FSGATE_CONFIG",
            "FSGATE_ROOT",
            "FSGATE_PUBLIC_ROOT",
            "FSGATE_MAX_UPLOAD_BYTES",
            "FSGATE_ALLOW_HIDDEN_UPLOADS",
            "FSGATE_LOG_MODE",
        ] {
            cmd.env_remove(var);
        }
        cmd
    }

    /// Get a command builder with both roots configured.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--root")
            .arg(&self.root)
            .arg("--public-root")
            .arg(&self.public);
        cmd
    }

    /// Absolute path of `rel` under the primary root.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Absolute path of `rel` under the public root.
    pub fn public_path(&self, rel: &str) -> PathBuf {
        self.public.join(rel)
    }

    /// Write a file under the primary root, creating parents.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Write a file outside both roots, for use as upload input.
    pub fn local_file(&self, name: &str, content: &str) -> PathBuf {
        let dir = self.temp_dir.path().join("local");
        fs::create_dir_all(&dir).expect("Failed to create local dir");
        let path = dir.join(name);
        fs::write(&path, content).expect("Failed to write local file");
        path
    }

    /// Write a YAML config file and return its path.
    pub fn config_file(&self, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join("fsgate.yaml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }

    /// Run a command expected to succeed and parse its stdout as JSON.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self
            .command()
            .args(args)
            .output()
            .expect("Failed to run fsgate");

        assert!(
            output.status.success(),
            "fsgate {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );

        serde_json::from_slice(&output.stdout).expect("Output is not valid JSON")
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether anything exists at `path`, without following symlinks.
#[allow(dead_code)]
pub fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}
