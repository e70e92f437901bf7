//! # blocks Registry Build Command
//!
//! File: cli/src/commands/registry/build.rs
//!
//! ## Overview
//!
//! Implements `blocks registry build` (and the bare `blocks` invocation):
//! runs the whole pipeline in memory, then writes the registry document
//! atomically so an interrupted run never leaves a truncated file behind.
//!
//! Only two failures abort the command: the metadata file cannot be loaded,
//! or the output cannot be written. Everything that goes wrong inside a
//! single block is logged and that block is left out.
//!
//! ## Examples
//!
//! ```bash
//! blocks registry build
//! # Successfully generated registry.json with 42 items.
//! ```
//!
use crate::common::fs::io::write_string_atomically;
use crate::core::config::Config;
use crate::core::error::{BlocksError, Result};
use crate::registry::synth::RegistryPipeline;
use clap::Parser;
use tracing::info;

/// # Build Registry Arguments (`BuildArgs`)
///
/// No options yet; paths and envelope fields come from `blocks.toml`.
#[derive(Parser, Debug, Default)]
pub struct BuildArgs {}

/// # Handle Registry Build Command (`handle_build`)
///
/// ## Workflow:
/// 1. Generates the registry with `RegistryPipeline::generate`.
/// 2. Serializes it (2-space indented JSON with a trailing newline).
/// 3. Writes it to the configured output path and reports the item count.
///
/// ## Returns
///
/// * `Err` if metadata loading, serialization or the final write fails.
pub async fn handle_build(_args: BuildArgs, cfg: &Config) -> Result<()> {
    info!("Handling registry build command...");

    let registry = RegistryPipeline::new(cfg).generate().await?;

    let output_path = cfg.output_path();
    let json = registry.to_json().map_err(|e| BlocksError::Output {
        path: output_path.display().to_string(),
        reason: e.to_string(),
    })?;
    write_string_atomically(&output_path, &json)?;

    println!(
        "Successfully generated {} with {} items.",
        cfg.paths.output_file,
        registry.items.len()
    );
    Ok(())
}
