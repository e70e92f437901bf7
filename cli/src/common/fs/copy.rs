//! # blocks Filesystem Copy Operations
//!
//! File: cli/src/common/fs/copy.rs
//!
//! ## Overview
//!
//! Recursive directory copying backed by `fs_extra`. The markdown mirror uses
//! it to stash preserved subtrees in a scratch directory and restore them after
//! the mirror has been regenerated.
//!
use crate::core::error::Result;
use std::path::Path;
use tracing::debug;

/// Copies the directory `source` to `target` (the directory itself, not only
/// its contents, ends up at `target`). Existing files are overwritten.
///
/// # Errors
///
/// Returns an `Err` if the source is missing or any copy step fails.
pub fn copy_directory_recursive(source: &Path, target: &Path) -> Result<()> {
    debug!("Copying {:?} to {:?}", source, target);

    let mut options = fs_extra::dir::CopyOptions::new();
    options.overwrite = true;
    options.copy_inside = true;

    fs_extra::dir::copy(source, target, &options).map_err(|e| {
        anyhow::anyhow!(e.to_string()).context(format!(
            "Failed to copy dir {:?} to {:?}",
            source, target
        ))
    })?;

    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_copy_directory_recursive_to_new_target() -> Result<()> {
        let base = tempdir()?;
        let source = base.path().join("keep");
        fs::create_dir_all(source.join("nested"))?;
        fs::write(source.join("a.md"), "a")?;
        fs::write(source.join("nested/b.md"), "b")?;

        let target = base.path().join("stash/keep");
        fs::create_dir_all(base.path().join("stash"))?;
        copy_directory_recursive(&source, &target)?;

        assert_eq!(fs::read_to_string(target.join("a.md"))?, "a");
        assert_eq!(fs::read_to_string(target.join("nested/b.md"))?, "b");
        Ok(())
    }

    #[test]
    fn test_copy_missing_source_fails() -> Result<()> {
        let base = tempdir()?;
        let result = copy_directory_recursive(&base.path().join("nope"), &base.path().join("out"));
        assert!(result.is_err());
        Ok(())
    }
}
