//! # blocks Registry Show Command
//!
//! File: cli/src/commands/registry/show.rs
//!
//! ## Overview
//!
//! Implements `blocks registry show <id>`: synthesizes the manifest entry of
//! one block exactly as `build` would, without writing anything, and prints
//! either the raw item (`--json`) or a summary with the install file tree and
//! the installer command lines for the common package managers.
//!
//! ## Examples
//!
//! ```bash
//! blocks registry show login-01
//! ```
//!
//! ```text
//! Simple Login (login-01)
//!   Category:     login
//!   Description:  A simple login block.
//!   Registry:     button, input
//!   Packages:     lucide-react
//!
//! Files:
//! /components/blocks/
//! └── login-01.tsx
//!
//! Install:
//!   pnpm  pnpm dlx shadcn@latest add https://blocks.so/r/login-01.json
//!   npm   npx shadcn@latest add https://blocks.so/r/login-01.json
//!   yarn  yarn dlx shadcn@latest add https://blocks.so/r/login-01.json
//!   bun   bunx --bun shadcn@latest add https://blocks.so/r/login-01.json
//! ```
//!
use super::tree_printer;
use crate::core::config::Config;
use crate::core::error::{BlocksError, Result};
use crate::registry::model::{BlockMetadata, RegistryItem};
use crate::registry::synth::RegistryPipeline;
use anyhow::Context;
use clap::Parser;
use tracing::info;

/// Installer runners, in display order.
const RUNNERS: &[(&str, &str)] = &[
    ("pnpm", "pnpm dlx"),
    ("npm", "npx"),
    ("yarn", "yarn dlx"),
    ("bun", "bunx --bun"),
];

/// # Show Block Arguments (`ShowArgs`)
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Id of the block (its file stem or directory name).
    pub(super) block_id: String,
    /// Print the manifest item as JSON instead of a summary.
    #[arg(long)]
    pub(super) json: bool,
}

/// # Handle Registry Show Command (`handle_show`)
///
/// ## Returns
///
/// * `Err` if metadata cannot be loaded, the id is unknown, or the block has
///   no installable files.
pub async fn handle_show(args: ShowArgs, cfg: &Config) -> Result<()> {
    info!("Handling registry show command for '{}'...", args.block_id);

    let pipeline = RegistryPipeline::new(cfg);
    let metadata = pipeline.load_metadata()?;
    let blocks = pipeline.discover(&metadata);
    let block = blocks.get(&args.block_id).ok_or_else(|| BlocksError::BlockNotFound {
        id: args.block_id.clone(),
    })?;

    let item = pipeline.item(block, &metadata).ok_or_else(|| {
        anyhow::anyhow!(
            "Block '{}' has no installable files under {}.",
            args.block_id,
            block.root.display()
        )
    })?;

    if args.json {
        let json = serde_json::to_string_pretty(&item)
            .context("Failed to serialize registry item")?;
        println!("{}", json);
    } else {
        print!(
            "{}",
            render_summary(
                &item,
                &block.category,
                metadata.get(&args.block_id),
                cfg
            )
        );
    }
    Ok(())
}

/// `{runner} shadcn@latest add {homepage}/r/{id}.json` for every runner.
pub(super) fn install_commands(homepage: &str, id: &str) -> Vec<(&'static str, String)> {
    let url = format!("{}/r/{}.json", homepage.trim_end_matches('/'), id);
    RUNNERS
        .iter()
        .map(|(label, runner)| (*label, format!("{} shadcn@latest add {}", runner, url)))
        .collect()
}

fn render_summary(
    item: &RegistryItem,
    category: &str,
    metadata: Option<&BlockMetadata>,
    cfg: &Config,
) -> String {
    let list_or_none = |values: &[String]| {
        if values.is_empty() {
            "none".to_string()
        } else {
            values.join(", ")
        }
    };

    let mut out = format!("{} ({})\n", item.title, item.name);
    out.push_str(&format!("  Category:     {}\n", category));
    out.push_str(&format!("  Description:  {}\n", item.description));
    if let Some(height) = metadata.and_then(|m| m.iframe_height.as_deref()) {
        out.push_str(&format!("  Preview:      {}\n", height));
    }
    out.push_str(&format!(
        "  Registry:     {}\n",
        list_or_none(&item.registry_dependencies)
    ));
    out.push_str(&format!(
        "  Packages:     {}\n",
        list_or_none(&item.dependencies)
    ));

    let targets: Vec<String> = item.files.iter().map(|f| f.target.clone()).collect();
    out.push_str("\nFiles:\n");
    out.push_str(&tree_printer::render_path_tree(
        &cfg.paths.install_root,
        &targets,
    ));

    out.push_str("\nInstall:\n");
    for (label, command) in install_commands(&cfg.registry.homepage, &item.name) {
        out.push_str(&format!("  {:<5} {}\n", label, command));
    }
    out
}
