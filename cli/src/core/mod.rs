//! # blocks Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! Foundational pieces shared by every command:
//! - `config`: locating, parsing and validating `blocks.toml`
//! - `error`: the `BlocksError` enum and the crate-wide `Result` alias
//!
//! ```rust
//! use crate::core::config;
//! use crate::core::error::{BlocksError, Result};
//! ```
//!
pub mod config;
pub mod error;
