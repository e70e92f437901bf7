//! # blocks Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Entry point of the `blocks` CLI, the build tooling of a component gallery.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Loading the project configuration (`blocks.toml`)
//! - Routing execution to the command handlers
//!
//! ## Architecture
//!
//! - Each top-level command is a variant of the `Commands` enum, mapped to a
//!   handler in `commands/`.
//! - With no command, `blocks` generates the registry (`registry build`).
//! - All errors are propagated here, printed once, and turned into exit code 1.
//!
//! ## Examples
//!
//! ```bash
//! # Generate registry.json in the current project
//! blocks
//!
//! # Same, with debug logging, for a project elsewhere
//! blocks -vv --root ../site registry build
//!
//! # Mirror sources into markdown/
//! blocks markdown
//! ```
//!
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command groups (registry, markdown)
mod common; // Shared filesystem utilities
mod core; // Errors and configuration
mod registry; // The registry generation pipeline

/// Top-level command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "blocks",
    about = "Component registry generator for blocks.so",
    long_about = "Scans a tree of UI component blocks, extracts their dependencies from \
                  import declarations and writes a shadcn-compatible registry.json.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    /// Project root; relative configured paths resolve against it.
    #[arg(long, global = true, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Explicit configuration file instead of searching for blocks.toml.
    #[arg(long, global = true, env = "BLOCKS_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,
}

/// All available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Build, inspect and list the component registry.
    #[command(alias = "r")]
    Registry(commands::registry::RegistryArgs),
    /// Mirror component sources into MDX documents.
    #[command(alias = "md")]
    Markdown(commands::markdown::MarkdownArgs),
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    let cfg = core::config::load_config(&root, cli.config.as_deref())?;
    tracing::debug!("Loaded configuration: {:?}", cfg);

    match cli.command {
        Some(Commands::Registry(args)) => commands::registry::handle_registry(args, &cfg).await,
        Some(Commands::Markdown(args)) => commands::markdown::handle_markdown(args, &cfg).await,
        None => commands::registry::build::handle_build(Default::default(), &cfg).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::debug!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
