//! # blocks Registry Command Group
//!
//! File: cli/src/commands/registry/mod.rs
//!
//! ## Overview
//!
//! Entry point and router for `blocks registry`. It defines the subcommands
//! (`build`, `show`, `list`) and hands each one the loaded project `Config`.
//!
//! ## Examples
//!
//! ```bash
//! # Generate registry.json (also what a bare `blocks` does)
//! blocks registry build
//!
//! # Inspect the manifest entry of a single block
//! blocks registry show login-01
//! blocks registry show login-01 --json
//!
//! # Count blocks per category
//! blocks registry list
//! ```
//!
use crate::core::config::Config;
use crate::core::error::Result;
use clap::{Parser, Subcommand};

/// Contains the handler and arguments for `blocks registry build`.
pub mod build;
/// Contains the handler and arguments for `blocks registry list`.
mod list;
/// Contains the handler and arguments for `blocks registry show`.
mod show;
/// Renders install targets as a directory tree for `show`.
mod tree_printer;

/// # Registry Command Group Arguments (`RegistryArgs`)
#[derive(Parser, Debug)]
pub struct RegistryArgs {
    #[command(subcommand)]
    command: RegistryCommand,
}

/// # Registry Subcommands (`RegistryCommand`)
#[derive(Subcommand, Debug)]
enum RegistryCommand {
    /// Scans the components tree and writes the registry document.
    Build(build::BuildArgs),
    /// Shows the manifest entry, file tree and install commands of one block.
    Show(show::ShowArgs),
    /// Lists blocks grouped by category.
    List(list::ListArgs),
}

/// # Handle Registry Command (`handle_registry`)
///
/// Dispatches to the selected subcommand handler and propagates its result.
pub async fn handle_registry(args: RegistryArgs, cfg: &Config) -> Result<()> {
    match args.command {
        RegistryCommand::Build(args) => build::handle_build(args, cfg).await?,
        RegistryCommand::Show(args) => show::handle_show(args, cfg).await?,
        RegistryCommand::List(args) => list::handle_list(args, cfg).await?,
    }
    Ok(())
}
