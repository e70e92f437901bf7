//! # blocks Common Utilities
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared, domain-agnostic helpers used by the registry pipeline and the
//! commands. Currently only filesystem operations live here.
//!
pub mod fs;
