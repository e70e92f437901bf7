//! # blocks Markdown Command
//!
//! File: cli/src/commands/markdown.rs
//!
//! ## Overview
//!
//! Implements `blocks markdown`, which mirrors the components tree into a
//! sibling `markdown/` directory so every block source can be served as an
//! MDX document:
//!
//! - `{category}/{name}.tsx` becomes `markdown/{category}/{name}.mdx`, the
//!   trimmed source wrapped in a ` ````tsx ` fence.
//! - Other regular files are copied as they are; `index.ts` barrels and
//!   subdirectories inside a category are skipped.
//! - The target is regenerated from scratch on every run, except for the
//!   subdirectories listed in `paths.preserve_dirs`, which are stashed in a
//!   temporary directory and restored afterwards.
//!
//! ## Examples
//!
//! ```bash
//! # Mirror the configured components directory
//! blocks markdown
//!
//! # Mirror another tree (output goes to ../markdown relative to it)
//! blocks markdown ./content/components
//! ```
//!
use crate::common::fs::copy::copy_directory_recursive;
use crate::common::fs::io::{ensure_dir_exists, read_file_to_string, write_string_to_file};
use crate::core::config::Config;
use crate::core::error::{BlocksError, Result};
use crate::registry::walker::is_hidden;
use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const MARKDOWN_DIR: &str = "markdown";
const FENCE: &str = "````";

/// # Markdown Arguments (`MarkdownArgs`)
#[derive(Parser, Debug, Default)]
pub struct MarkdownArgs {
    /// Components directory to mirror. Defaults to `paths.components_dir`.
    components_dir: Option<PathBuf>,
}

/// Counts reported after a mirror run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct MirrorSummary {
    pub categories: usize,
    pub documents: usize,
    pub copied: usize,
}

/// # Handle Markdown Command (`handle_markdown`)
///
/// ## Returns
///
/// * `Err` if the components directory is missing, has no parent, or any
///   filesystem step of the mirror fails.
pub async fn handle_markdown(args: MarkdownArgs, cfg: &Config) -> Result<()> {
    info!("Handling markdown command...");

    let source = match args.components_dir {
        Some(dir) if dir.is_absolute() => dir,
        Some(dir) => std::env::current_dir()
            .context("Failed to determine the current directory")?
            .join(dir),
        None => cfg.components_root(),
    };
    if !source.is_dir() {
        anyhow::bail!(BlocksError::ArgumentParsing(format!(
            "Components directory '{}' does not exist or is not a directory.",
            source.display()
        )));
    }
    let target = markdown_target(&source)?;

    let summary = mirror_components(&source, &target, &cfg.paths.preserve_dirs)?;
    info!(
        "Mirrored {} categories: {} MDX documents, {} copied files",
        summary.categories, summary.documents, summary.copied
    );
    println!("Successfully generated markdown files in {}", target.display());
    Ok(())
}

/// `{parent of source}/markdown`.
fn markdown_target(source: &Path) -> Result<PathBuf> {
    let parent = source
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .ok_or_else(|| {
            BlocksError::ArgumentParsing(format!(
                "Components directory '{}' has no parent directory to write into.",
                source.display()
            ))
        })?;
    Ok(parent.join(MARKDOWN_DIR))
}

/// Wraps a component source as an MDX document.
pub fn wrap_source(source: &str) -> String {
    format!("{}tsx\n{}\n{}", FENCE, source.trim(), FENCE)
}

/// Regenerates `target` from `source`, keeping `preserve_dirs`.
pub fn mirror_components(
    source: &Path,
    target: &Path,
    preserve_dirs: &[String],
) -> Result<MirrorSummary> {
    let stash = tempfile::tempdir().context("Failed to create a temporary directory")?;
    let mut stashed = Vec::new();
    for dir in preserve_dirs {
        let kept = target.join(dir);
        if !kept.is_dir() {
            continue;
        }
        let holding = stash.path().join(dir);
        if let Some(parent) = holding.parent() {
            ensure_dir_exists(parent)?;
        }
        copy_directory_recursive(&kept, &holding)?;
        debug!("Stashed preserved directory {}", kept.display());
        stashed.push(dir);
    }

    if target.exists() {
        fs::remove_dir_all(target)
            .with_context(|| format!("Failed to clear {}", target.display()))?;
    }
    ensure_dir_exists(target)?;

    for dir in stashed {
        let restored = target.join(dir);
        if let Some(parent) = restored.parent() {
            ensure_dir_exists(parent)?;
        }
        copy_directory_recursive(&stash.path().join(dir), &restored)?;
        debug!("Restored preserved directory {}", restored.display());
    }

    let mut summary = MirrorSummary::default();
    for category in sorted_children(source)? {
        if !category.is_dir() {
            continue;
        }
        let category_target = target.join(file_name(&category));
        ensure_dir_exists(&category_target)?;
        summary.categories += 1;

        for entry in sorted_children(&category)? {
            let name = file_name(&entry);
            if !entry.is_file() || name == "index.ts" {
                debug!("Skipping {}", entry.display());
                continue;
            }
            if entry.extension().is_some_and(|ext| ext == "tsx") {
                let stem = entry
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let content = read_file_to_string(&entry)?;
                write_string_to_file(
                    &category_target.join(format!("{}.mdx", stem)),
                    &wrap_source(&content),
                )?;
                summary.documents += 1;
            } else {
                fs::copy(&entry, category_target.join(&name)).with_context(|| {
                    format!("Failed to copy {} into {}", entry.display(), category_target.display())
                })?;
                summary.copied += 1;
            }
        }
    }

    Ok(summary)
}

fn sorted_children(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))? {
        let entry = entry.with_context(|| format!("Failed to read an entry of {}", dir.display()))?;
        if is_hidden(&entry.file_name()) {
            continue;
        }
        children.push(entry.path());
    }
    children.sort();
    Ok(children)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
