//! # blocks Registry Pipeline
//!
//! File: cli/src/registry/mod.rs
//!
//! ## Overview
//!
//! Everything needed to turn a components tree into a shadcn-compatible
//! `registry.json`, from the leaves up:
//!
//! - `model`: the data types written to (and read from) disk.
//! - `metadata`: loads declarative block records (TOML or JSON).
//! - `imports`: parses a module with swc and lists its top-level `import` declarations.
//! - `extractor`: classifies import specifiers into dependency sets.
//! - `walker`: maps a block's files to their install targets.
//! - `discovery`: finds categories and blocks in the components tree.
//! - `synth`: combines all of the above into registry items.
//!
//! Commands in `crate::commands::registry` drive the pipeline through
//! `synth::RegistryPipeline`.
//!
pub mod discovery;
pub mod extractor;
pub mod imports;
pub mod metadata;
pub mod model;
pub mod synth;
pub mod walker;
