//! # blocks Block Discovery
//!
//! File: cli/src/registry/discovery.rs
//!
//! ## Overview
//!
//! Finds categories and blocks in the components tree and completes them
//! with blocks that only metadata knows about.
//!

use crate::core::error::Result;
use crate::registry::metadata::MetadataMap;
use crate::registry::model::ContentType;
use crate::registry::walker::{is_hidden, BlockSource};
use anyhow::Context;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Blocks keyed (and therefore ordered) by id.
pub type BlockIndex = BTreeMap<String, BlockSource>;

/// Scans `components_root/{category}/{entry}`.
///
/// Every non-hidden subdirectory is a category. Inside it, a subdirectory is a
/// directory block and a file with one of `block_extensions` is a file block
/// named after its stem; hidden entries and `index.*` are skipped. Categories
/// are visited in name order, so when an id repeats the first category wins.
///
/// # Errors
///
/// Fails only when `components_root` itself cannot be listed; unreadable
/// category directories are logged and skipped.
pub fn discover_blocks(components_root: &Path, block_extensions: &[String]) -> Result<BlockIndex> {
    let mut blocks = BlockIndex::new();

    for category_dir in sorted_entries(components_root).with_context(|| {
        format!(
            "Failed to read components directory '{}'",
            components_root.display()
        )
    })? {
        if !category_dir.is_dir() {
            continue;
        }
        let category = file_name(&category_dir);

        let entries = match sorted_entries(&category_dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Failed to read category directory '{}': {}",
                    category_dir.display(),
                    e
                );
                continue;
            }
        };

        for entry in entries {
            let name = file_name(&entry);
            if name.starts_with("index.") {
                continue;
            }

            let (id, content_type) = if entry.is_dir() {
                (name, ContentType::Directory)
            } else if entry.is_file() && has_extension(&entry, block_extensions) {
                let stem = entry
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                (stem, ContentType::File)
            } else {
                debug!("Skipping non-block entry: {}", entry.display());
                continue;
            };

            if let Some(existing) = blocks.get(&id) {
                warn!(
                    "Block ID \"{}\" found in both '{}' and '{}'; keeping '{}'.",
                    id, existing.category, category, existing.category
                );
                continue;
            }

            blocks.insert(
                id.clone(),
                BlockSource {
                    id,
                    category: category.clone(),
                    root: entry,
                    content_type,
                },
            );
        }
    }

    Ok(blocks)
}

/// Applies declared content types from metadata and adds the blocks metadata
/// places in a category but that discovery did not find, at the location they
/// would have on disk.
pub fn apply_metadata(
    blocks: &mut BlockIndex,
    metadata: &MetadataMap,
    components_root: &Path,
    block_extensions: &[String],
) {
    for (id, meta) in metadata {
        if let Some(block) = blocks.get_mut(id) {
            if let Some(declared) = meta.content_type {
                block.content_type = declared;
            }
            if let Some(category) = meta.category.as_deref() {
                if category != block.category {
                    warn!(
                        "Block \"{}\" is listed under category '{}' but lives in '{}'.",
                        id, category, block.category
                    );
                }
            }
            continue;
        }

        let (Some(category), Some(content_type)) = (meta.category.as_deref(), meta.content_type)
        else {
            debug!(
                "Metadata for \"{}\" has no category/type and no source was found; ignoring.",
                id
            );
            continue;
        };

        let category_dir = components_root.join(category);
        let root = match content_type {
            ContentType::Directory => category_dir.join(id),
            ContentType::File => expected_file(&category_dir, id, block_extensions),
        };
        blocks.insert(
            id.clone(),
            BlockSource {
                id: id.clone(),
                category: category.to_string(),
                root,
                content_type,
            },
        );
    }
}

/// First existing `{id}.{ext}`, or the path with the first extension.
fn expected_file(category_dir: &Path, id: &str, block_extensions: &[String]) -> PathBuf {
    let candidates: Vec<PathBuf> = block_extensions
        .iter()
        .map(|ext| category_dir.join(format!("{}.{}", id, ext)))
        .collect();
    candidates
        .iter()
        .find(|path| path.is_file())
        .or_else(|| candidates.first())
        .cloned()
        .unwrap_or_else(|| category_dir.join(id))
}

fn sorted_entries(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if is_hidden(&entry.file_name()) {
            continue;
        }
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
}
