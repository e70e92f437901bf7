//! # blocks Registry List Command
//!
//! File: cli/src/commands/registry/list.rs
//!
//! ## Overview
//!
//! Implements `blocks registry list`, the per-category block count the
//! gallery shows. Categories combine what discovery finds on disk with the
//! categories metadata assigns, so a block declared in metadata but not yet
//! written still counts towards its category.
//!
//! ## Examples
//!
//! ```text
//! Category      | Blocks | Ids
//! --------------+--------+--------------------------------------------------
//! file-upload   |      1 | file-upload-02
//! login         |      2 | login-01, login-02
//!
//! Found 3 block(s) in 2 categories.
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use crate::registry::discovery::BlockIndex;
use crate::registry::metadata::MetadataMap;
use crate::registry::synth::RegistryPipeline;
use clap::Parser;
use std::collections::{BTreeMap, BTreeSet};
use tracing::info;

/// # List Registry Arguments (`ListArgs`)
#[derive(Parser, Debug)]
pub struct ListArgs {}

/// # Handle Registry List Command (`handle_list`)
///
/// ## Returns
///
/// * `Err` only when the metadata file cannot be loaded.
pub async fn handle_list(_args: ListArgs, cfg: &Config) -> Result<()> {
    info!("Handling registry list command...");

    let pipeline = RegistryPipeline::new(cfg);
    let metadata = pipeline.load_metadata()?;
    let blocks = pipeline.discover(&metadata);
    let categories = group_by_category(&blocks, &metadata);
    print_category_table(&categories, &cfg.paths.components_dir);
    Ok(())
}

/// Category → block ids, both ordered by name.
fn group_by_category(
    blocks: &BlockIndex,
    metadata: &MetadataMap,
) -> BTreeMap<String, BTreeSet<String>> {
    let mut categories: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for block in blocks.values() {
        categories
            .entry(block.category.clone())
            .or_default()
            .insert(block.id.clone());
    }
    for meta in metadata.values() {
        if blocks.contains_key(&meta.id) {
            continue;
        }
        if let Some(category) = &meta.category {
            categories
                .entry(category.clone())
                .or_default()
                .insert(meta.id.clone());
        }
    }
    categories
}

fn print_category_table(categories: &BTreeMap<String, BTreeSet<String>>, components_dir: &str) {
    if categories.is_empty() {
        println!("No blocks found in '{}'.", components_dir);
        println!("Each subdirectory of it is a category; each .tsx file or directory inside one is a block.");
        return;
    }

    let name_width = categories
        .keys()
        .map(|name| name.len())
        .max()
        .unwrap_or(8)
        .clamp(8, 30);

    println!("{:<width$} | Blocks | Ids", "Category", width = name_width);
    println!("{:-<width$}-+--------+-{:-<50}", "", "", width = name_width);
    let mut total = 0;
    for (category, ids) in categories {
        total += ids.len();
        let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
        println!(
            "{:<width$} | {:>6} | {}",
            category,
            ids.len(),
            ids.join(", "),
            width = name_width
        );
    }
    println!(
        "\nFound {} block(s) in {} categories.",
        total,
        categories.len()
    );
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::model::{BlockMetadata, ContentType};
    use crate::registry::walker::BlockSource;
    use std::path::PathBuf;

    fn block(id: &str, category: &str) -> BlockSource {
        BlockSource {
            id: id.into(),
            category: category.into(),
            root: PathBuf::from(format!("{}/{}.tsx", category, id)),
            content_type: ContentType::File,
        }
    }

    fn meta(id: &str, category: Option<&str>) -> BlockMetadata {
        BlockMetadata {
            id: id.into(),
            name: id.into(),
            category: category.map(str::to_string),
            content_type: None,
            iframe_height: None,
        }
    }

    #[test]
    fn test_group_by_category_merges_disk_and_metadata() {
        let mut blocks = BlockIndex::new();
        blocks.insert("login-02".into(), block("login-02", "login"));
        blocks.insert("login-01".into(), block("login-01", "login"));
        blocks.insert("stats-01".into(), block("stats-01", "stats"));

        let mut metadata = MetadataMap::new();
        metadata.insert("login-01".into(), meta("login-01", Some("auth")));
        metadata.insert("dialog-01".into(), meta("dialog-01", Some("dialogs")));
        metadata.insert("loose".into(), meta("loose", None));

        let grouped = group_by_category(&blocks, &metadata);
        assert_eq!(
            grouped.keys().collect::<Vec<_>>(),
            vec!["dialogs", "login", "stats"]
        );
        assert_eq!(
            grouped["login"].iter().collect::<Vec<_>>(),
            vec!["login-01", "login-02"]
        );
        assert!(grouped["dialogs"].contains("dialog-01"));
    }
}
