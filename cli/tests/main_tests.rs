//! # blocks CLI Main Integration Tests
//!
//! File: cli/tests/main_tests.rs
//!
//! ## Overview
//!
//! Top-level behaviour of the `blocks` binary: standard flags, the default
//! command, and configuration errors.
//!

mod common;
use common::*;
use predicates::prelude::*;

#[test]
fn test_main_help_flag() {
    blocks_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("registry"))
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_main_version_flag() {
    blocks_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_command_builds_registry() {
    let project = Project::new();
    project
        .metadata("blocks = []\n")
        .component("login/login-01.tsx", "export default function Login() {}\n");

    project
        .cmd()
        .assert()
        .success()
        .stdout("Successfully generated registry.json with 1 items.\n");
    assert!(project.path("registry.json").is_file());
}

#[test]
fn test_unknown_config_key_fails() {
    let project = Project::new();
    project.write("blocks.toml", "[paths]\ncomponent_dir = \"src\"\n");

    project
        .cmd()
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("Error:"));
}

#[test]
fn test_explicit_config_and_root() {
    let project = Project::new();
    project
        .write(
            "config/custom.toml",
            "[paths]\ncomponents_dir = \"src/blocks\"\nmetadata_file = \"meta.json\"\noutput_file = \"public/r.json\"\n",
        )
        .write("config/meta.json", "[]")
        .write("config/src/blocks/cards/card-01.tsx", "import { z } from \"zod\";\n");

    blocks_cmd()
        .arg("--root")
        .arg(project.root())
        .arg("--config")
        .arg(project.path("config/custom.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("public/r.json with 1 items."));

    let registry: serde_json::Value =
        serde_json::from_str(&project.read("config/public/r.json")).unwrap();
    assert_eq!(registry["items"][0]["files"][0]["path"], "src/blocks/cards/card-01.tsx");
    assert_eq!(registry["items"][0]["dependencies"][0], "zod");
}
