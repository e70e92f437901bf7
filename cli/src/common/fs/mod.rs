//! # blocks Filesystem Utilities (`common::fs`)
//!
//! File: cli/src/common/fs/mod.rs
//!
//! ## Overview
//!
//! Filesystem helpers shared by the pipeline and the commands:
//!
//! - **`copy`**: recursive directory copies (via `fs_extra`), used by the
//!   markdown mirror to stash and restore preserved directories.
//! - **`io`**: path probing, directory creation, whole-file reads and writes,
//!   and the atomic write used for the registry output.
//!
//! Import from the submodule directly, e.g.
//! `crate::common::fs::io::write_string_atomically`.
//!
pub mod copy;
pub mod io;
