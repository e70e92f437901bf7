//! # blocks CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: a command
//! builder for the compiled `blocks` binary and a throwaway project fixture.
//!

// Each test crate uses a different subset of these helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// # Get blocks Command (`blocks_cmd`)
///
/// An `assert_cmd::Command` for the `blocks` binary, isolated from the
/// caller's `BLOCKS_CONFIG` and `RUST_LOG`.
pub fn blocks_cmd() -> Command {
    let mut cmd = Command::cargo_bin("blocks").expect("Failed to find blocks binary for testing");
    cmd.env_remove("BLOCKS_CONFIG").env_remove("RUST_LOG");
    cmd
}

/// A temporary project root. A `.git` directory stops the config search
/// from escaping into the directories above it.
pub struct Project {
    dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp project");
        fs::create_dir_all(dir.path().join(".git")).expect("Failed to create .git marker");
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Writes `content` at `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().expect("fixture path has a parent"))
            .expect("Failed to create fixture directory");
        fs::write(&path, content).expect("Failed to write fixture file");
        self
    }

    /// Writes the default metadata file.
    pub fn metadata(&self, toml: &str) -> &Self {
        self.write("content/blocks-metadata.toml", toml)
    }

    /// Writes a component source under `content/components`.
    pub fn component(&self, relative: &str, source: &str) -> &Self {
        self.write(&format!("content/components/{}", relative), source)
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative)).expect("Failed to read fixture output")
    }

    /// `blocks` run with this project as its root.
    pub fn cmd(&self) -> Command {
        let mut cmd = blocks_cmd();
        cmd.current_dir(self.root());
        cmd
    }

    /// Parsed `registry.json`.
    pub fn registry_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.read("registry.json")).expect("registry.json is valid JSON")
    }
}
