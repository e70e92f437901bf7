//! # blocks Block File Walker
//!
//! File: cli/src/registry/walker.rs
//!
//! ## Overview
//!
//! Maps a block's root on disk to the files the installer copies. A file
//! block yields one entry; a directory block is walked recursively, skipping
//! hidden entries and `index.*` files.
//!

use crate::common::fs::io::{probe_path, PathProbe};
use crate::registry::model::{ContentType, FileEntry};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Barrel files re-exporting a block are not installed on their own.
const BARREL_STEM: &str = "index";

/// A block located in (or expected in) the components tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSource {
    pub id: String,
    pub category: String,
    /// `{category}/{id}.tsx` for file blocks, `{category}/{id}/` for directories.
    pub root: PathBuf,
    /// Declared layout: from metadata when it names one, else what discovery saw.
    pub content_type: ContentType,
}

/// Where sources live and where they install to.
#[derive(Debug, Clone)]
pub struct WalkLayout {
    /// Absolute (or cwd-relative) components root.
    pub components_root: PathBuf,
    /// Prefix written in front of every registry `path`.
    pub components_label: String,
    /// Install prefix of every registry `target`.
    pub install_root: String,
}

impl WalkLayout {
    fn source_path(&self, file: &Path) -> String {
        let relative = pathdiff::diff_paths(file, &self.components_root)
            .unwrap_or_else(|| PathBuf::from(file.file_name().unwrap_or_default()));
        join_slash(&self.components_label, &to_slash(&relative))
    }

    fn target_path(&self, relative: &str) -> String {
        join_slash(&self.install_root, relative)
    }
}

/// Collects the `FileEntry` list of one block, sorted by target.
///
/// A missing or unreadable root yields no entries (and a warning). When the
/// declared content type disagrees with the disk, the disk wins.
pub fn collect_block_files(block: &BlockSource, layout: &WalkLayout) -> Vec<FileEntry> {
    let mut files = match probe_path(&block.root) {
        PathProbe::Absent => {
            warn!(
                "Source for block \"{}\" not found at {}; skipping.",
                block.id,
                block.root.display()
            );
            Vec::new()
        }
        PathProbe::Unreadable(e) => {
            warn!(
                "Source for block \"{}\" at {} is unreadable: {}; skipping.",
                block.id,
                block.root.display(),
                e
            );
            Vec::new()
        }
        PathProbe::File => {
            if block.content_type == ContentType::Directory {
                warn!(
                    "Block \"{}\" is declared as a directory but {} is a file.",
                    block.id,
                    block.root.display()
                );
            }
            vec![single_file_entry(&block.root, layout)]
        }
        PathProbe::Directory => {
            if block.content_type == ContentType::File {
                warn!(
                    "Block \"{}\" is declared as a file but {} is a directory.",
                    block.id,
                    block.root.display()
                );
            }
            directory_entries(&block.id, &block.root, layout)
        }
    };

    files.sort_by(|a, b| a.target.cmp(&b.target));
    files
}

fn single_file_entry(file: &Path, layout: &WalkLayout) -> FileEntry {
    let base_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    FileEntry::new(layout.source_path(file), layout.target_path(&base_name))
}

fn directory_entries(block_id: &str, root: &Path, layout: &WalkLayout) -> Vec<FileEntry> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_hidden(entry.file_name()));

    for entry_result in walker {
        let entry = match entry_result {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    "Failed to access entry while walking block \"{}\": {}",
                    block_id, e
                );
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.file_stem().is_some_and(|stem| stem == BARREL_STEM) {
            debug!("Skipping barrel file: {}", path.display());
            continue;
        }
        let relative = match path.strip_prefix(root) {
            Ok(relative) => to_slash(relative),
            Err(_) => {
                warn!(
                    "Could not determine relative path for '{}' based on '{}'",
                    path.display(),
                    root.display()
                );
                continue;
            }
        };
        let target = layout.target_path(&join_slash(block_id, &relative));
        files.push(FileEntry::new(layout.source_path(path), target));
    }

    if files.is_empty() {
        warn!(
            "Directory block \"{}\" at {} contains no installable files.",
            block_id,
            root.display()
        );
    }
    files
}

pub(crate) fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Joins path components with `/` regardless of platform.
pub(crate) fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            Component::ParentDir => Some("..".to_string()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn join_slash(base: &str, relative: &str) -> String {
    let relative = relative.trim_start_matches('/');
    if base.is_empty() {
        relative.to_string()
    } else if relative.is_empty() {
        base.to_string()
    } else if base.ends_with('/') {
        format!("{}{}", base, relative)
    } else {
        format!("{}/{}", base, relative)
    }
}
