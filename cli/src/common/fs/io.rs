//! # blocks Filesystem I/O Operations
//!
//! File: cli/src/common/fs/io.rs
//!
//! ## Overview
//!
//! Thin wrappers around `std::fs` used by the registry and markdown commands.
//!
//! - **`probe_path`**: classifies a path as absent, a file, a directory, or
//!   present-but-unreadable, so callers branch on a value instead of catching
//!   I/O errors.
//! - **`ensure_dir_exists`**: `mkdir -p`, failing if the path is a file.
//! - **`read_file_to_string`**: `fs::read_to_string` with context.
//! - **`write_string_atomically`**: writes a temp file next to the destination
//!   and renames it into place, so readers never observe a half-written
//!   registry.
//!
use crate::core::error::{BlocksError, Result};
use anyhow::Context;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// What a filesystem probe found at a path.
#[derive(Debug)]
pub enum PathProbe {
    /// Nothing exists at the path.
    Absent,
    /// A regular file (symlinks are followed).
    File,
    /// A directory (symlinks are followed).
    Directory,
    /// Something exists but its metadata could not be read, or it is neither
    /// a file nor a directory.
    Unreadable(io::Error),
}

/// Classifies `path` without treating absence as an error.
pub fn probe_path(path: &Path) -> PathProbe {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => PathProbe::Directory,
        Ok(meta) if meta.is_file() => PathProbe::File,
        Ok(_) => PathProbe::Unreadable(io::Error::new(
            io::ErrorKind::Other,
            "not a regular file or directory",
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => PathProbe::Absent,
        Err(e) => PathProbe::Unreadable(e),
    }
}

/// Ensures that a directory exists at the specified path, creating parents
/// as needed.
///
/// # Errors
///
/// Returns an `Err` if the path exists but is not a directory, or if creating
/// it fails.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory {:?}", path))?;
        info!("Created directory: {:?}", path);
    } else if !path.is_dir() {
        anyhow::bail!(BlocksError::FileSystem(format!(
            "Path exists but is not a directory: {:?}",
            path
        )));
    } else {
        debug!("Directory already exists: {:?}", path);
    }
    Ok(())
}

/// Reads the entire content of a file into a string.
pub fn read_file_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file {:?}", path))
}

/// Writes `content` to `path`, creating the parent directory if needed.
/// Overwrites any existing file.
pub fn write_string_to_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir_exists(parent)?;
    }
    fs::write(path, content).with_context(|| format!("Failed to write to file {:?}", path))?;
    debug!("Wrote content to file: {:?}", path);
    Ok(())
}

/// Writes `content` to `path` through a temporary file in the same directory
/// that is renamed over the destination once fully flushed.
///
/// # Errors
///
/// Every failure is reported as `BlocksError::Output` naming the destination.
pub fn write_string_atomically(path: &Path, content: &str) -> Result<()> {
    let output_err = |reason: String| BlocksError::Output {
        path: path.display().to_string(),
        reason,
    };

    let parent = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent,
        None => Path::new("."),
    };
    ensure_dir_exists(parent).map_err(|e| output_err(format!("{:#}", e)))?;

    let mut temp = NamedTempFile::new_in(parent).map_err(|e| output_err(e.to_string()))?;
    temp.write_all(content.as_bytes())
        .and_then(|_| temp.as_file().sync_all())
        .map_err(|e| output_err(e.to_string()))?;
    temp.persist(path).map_err(|e| output_err(e.error.to_string()))?;

    info!("Wrote {} bytes to {:?}", content.len(), path);
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_probe_path_variants() -> Result<()> {
        let base = tempdir()?;
        let file = base.path().join("a.tsx");
        fs::write(&file, "export {}")?;

        assert!(matches!(probe_path(base.path()), PathProbe::Directory));
        assert!(matches!(probe_path(&file), PathProbe::File));
        assert!(matches!(
            probe_path(&base.path().join("missing")),
            PathProbe::Absent
        ));
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_creates_new() -> Result<()> {
        let base_dir = tempdir()?;
        let new_dir = base_dir.path().join("new/subdir");
        assert!(!new_dir.exists());
        ensure_dir_exists(&new_dir)?;
        assert!(new_dir.is_dir());
        Ok(())
    }

    #[test]
    fn test_ensure_dir_exists_path_is_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("a_file.txt");
        fs::write(&file_path, "hello")?;
        let result = ensure_dir_exists(&file_path);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Path exists but is not a directory"));
        Ok(())
    }

    #[test]
    fn test_read_write_string_to_file() -> Result<()> {
        let base_dir = tempdir()?;
        let file_path = base_dir.path().join("nested/test_rw.txt");
        write_string_to_file(&file_path, "Hello, blocks!")?;
        assert_eq!(read_file_to_string(&file_path)?, "Hello, blocks!");
        Ok(())
    }

    #[test]
    fn test_write_atomically_replaces_existing() -> Result<()> {
        let base_dir = tempdir()?;
        let out = base_dir.path().join("registry.json");
        fs::write(&out, "old")?;
        write_string_atomically(&out, "{}\n")?;
        assert_eq!(fs::read_to_string(&out)?, "{}\n");

        // No temp files left behind.
        let leftovers = fs::read_dir(base_dir.path())?.count();
        assert_eq!(leftovers, 1);
        Ok(())
    }

    #[test]
    fn test_write_atomically_into_file_parent_fails() -> Result<()> {
        let base_dir = tempdir()?;
        let blocker = base_dir.path().join("blocker");
        fs::write(&blocker, "")?;
        let result = write_string_atomically(&blocker.join("registry.json"), "{}");
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BlocksError>(),
            Some(BlocksError::Output { .. })
        ));
        Ok(())
    }
}
