//! # blocks Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! Aggregates the command groups of the `blocks` CLI so `main.rs` can route
//! to them:
//!
//! - `registry`: build, inspect and list the component registry.
//! - `markdown`: mirror component sources into MDX documents.
//!
//! Each group defines its own clap arguments and an async handler that
//! receives the loaded project `Config`.
//!

/// Command group for the component registry. Includes `build`, `show` and `list`.
pub mod registry;
/// Standalone command mirroring the components tree as markdown.
pub mod markdown;
