//! # blocks Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout the registry tooling.
//! The split mirrors how failures are handled at runtime:
//!
//! - `BlocksError`: a `thiserror` enum naming the failure domains (configuration,
//!   filesystem, metadata, source parsing, output).
//! - `Result<T>`: an alias for `anyhow::Result<T>`, so callers can attach context
//!   with `anyhow::Context` while still downcasting to `BlocksError` when they need
//!   to tell a fatal failure apart from a per-block one.
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if !path.is_file() {
//!     anyhow::bail!(BlocksError::Metadata {
//!         path: path.display().to_string(),
//!         reason: "file not found".into(),
//!     });
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use thiserror::Error;

/// Custom error type for the registry tooling.
#[derive(Error, Debug)]
pub enum BlocksError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Filesystem error: {0}")]
    FileSystem(String),

    #[error("Failed to load block metadata from '{path}': {reason}")]
    Metadata { path: String, reason: String },

    #[error("Syntax error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Failed to write output '{path}': {reason}")]
    Output { path: String, reason: String },

    #[error("Block '{id}' not found.")]
    BlockNotFound { id: String },

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Type alias for Result using anyhow::Error for context-rich propagation.
pub type Result<T> = anyhow::Result<T>;
