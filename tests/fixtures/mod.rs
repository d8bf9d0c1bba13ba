//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // not every test file uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Path to the us-map-maker binary
pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_us-map-maker")
}

/// Test workspace with an isolated config directory.
pub struct Workspace {
    /// Owns the directory; removed on drop
    pub dir: TempDir,
}

impl Workspace {
    /// Creates an empty workspace.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Absolute path inside the workspace.
    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Config directory used by every command run through this workspace.
    pub fn config_dir(&self) -> PathBuf {
        self.path("config")
    }

    /// Builds a command with the isolated config directory.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(bin());
        cmd.env("US_MAP_MAKER_CONFIG_DIR", self.config_dir());
        cmd.env_remove("RUST_LOG");
        cmd.current_dir(self.dir.path());
        cmd.args(args);
        cmd
    }

    /// Runs a command and returns its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Writes a file into the workspace.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        fs::write(&path, content).expect("Failed to write fixture");
        path
    }

    /// Creates a default map file via `new`.
    pub fn new_map(&self, name: &str) -> PathBuf {
        let path = self.path(name);
        let output = self.run(&["new", "-o", path_str(&path)]);
        assert_success(&output);
        path
    }
}

/// Converts a path for use as a command argument.
pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("non-UTF-8 temp path")
}

/// Asserts a zero exit status, printing stderr otherwise.
pub fn assert_success(output: &Output) {
    assert_eq!(
        output.status.code(),
        Some(0),
        "command failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

/// Reads the value stored for `key` in a map CSV.
pub fn csv_value(path: &Path, key: &str) -> Option<String> {
    let text = fs::read_to_string(path).expect("Failed to read map file");
    text.lines()
        .filter_map(|line| line.split_once(','))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v.to_string())
}

/// A two-region dataset for `--regions`.
pub const TINY_REGIONS: &str = r#"{"regions":[
    {"id":"AA","name":"Alpha","path":"M 100 100 h 50 v 50 h -50 Z"},
    {"id":"BB","name":"Beta","path":"M 200 100 h 50 v 50 h -50 Z"}
]}"#;
