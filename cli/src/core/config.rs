//! # blocks Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements the configuration system for the registry tooling:
//! locating the optional `blocks.toml` project file, parsing it, expanding and
//! resolving paths, and validating the result before any command runs.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. An explicit file passed with `--config` (or the `BLOCKS_CONFIG` variable)
//! 2. `blocks.toml` in the project root or its ancestors (the search stops at a
//!    directory containing `.git`)
//! 3. Default values defined in the code, which reproduce the blocks.so layout
//!
//! Every configured path is relative to the *project root*: the directory that
//! holds the config file that was found, or the `--root` directory (current
//! directory by default) when no file exists.
//!
//! ## Examples
//!
//! ```toml
//! [paths]
//! components_dir = "content/components"
//! metadata_file = "content/blocks-metadata.toml"
//! output_file = "public/registry.json"
//!
//! [imports]
//! framework_packages = ["react", "react-dom", "next"]
//! ```
//!
//! ```rust
//! let cfg = config::load_config(&root, None)?;
//! let components = cfg.components_root();
//! let output = cfg.output_path();
//! ```
//!
use crate::core::error::{BlocksError, Result};
use anyhow::{anyhow, Context};
use serde::Deserialize;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};
use tracing::{debug, info};

/// Represents the main configuration structure, loaded from `blocks.toml`.
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub imports: ImportsConfig,
    /// Directory every relative path is resolved against. Set by the loader.
    #[serde(skip)]
    pub project_root: PathBuf,
}

/// Filesystem layout of the project (`[paths]`).
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct PathsConfig {
    /// Root of the component tree, one subdirectory per category. Also used,
    /// verbatim, as the prefix of every `path` written to the registry.
    #[serde(default = "default_components_dir")]
    pub components_dir: String,
    /// Declarative block metadata (`.toml` or `.json`).
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,
    /// Where the registry document is written.
    #[serde(default = "default_output_file")]
    pub output_file: String,
    /// Install destination prefix used for every `target`.
    #[serde(default = "default_install_root")]
    pub install_root: String,
    /// Subdirectories of the markdown mirror kept across regenerations.
    #[serde(default)]
    pub preserve_dirs: Vec<String>,
}

/// Constant fields of the registry envelope (`[registry]`).
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    #[serde(default = "default_schema")]
    pub schema: String,
    #[serde(default = "default_registry_name")]
    pub name: String,
    #[serde(default = "default_homepage")]
    pub homepage: String,
    #[serde(default = "default_author")]
    pub author: String,
}

/// Import classification rules (`[imports]`).
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct ImportsConfig {
    /// Specifiers under this prefix name an internal UI primitive.
    #[serde(default = "default_ui_prefix")]
    pub ui_prefix: String,
    /// Specifiers starting with any of these are relative or aliased and ignored.
    #[serde(default = "default_ignored_prefixes")]
    pub ignored_prefixes: Vec<String>,
    /// Framework packages whose imports (and sub-path imports) are ignored.
    #[serde(default = "default_framework_packages")]
    pub framework_packages: Vec<String>,
    /// Package scopes (e.g. `@next`) whose imports are ignored.
    #[serde(default = "default_framework_scopes")]
    pub framework_scopes: Vec<String>,
    /// Extensions that make a file directly inside a category a single-file block.
    #[serde(default = "default_block_extensions")]
    pub block_extensions: Vec<String>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            components_dir: default_components_dir(),
            metadata_file: default_metadata_file(),
            output_file: default_output_file(),
            install_root: default_install_root(),
            preserve_dirs: Vec::new(),
        }
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            schema: default_schema(),
            name: default_registry_name(),
            homepage: default_homepage(),
            author: default_author(),
        }
    }
}

impl Default for ImportsConfig {
    fn default() -> Self {
        Self {
            ui_prefix: default_ui_prefix(),
            ignored_prefixes: default_ignored_prefixes(),
            framework_packages: default_framework_packages(),
            framework_scopes: default_framework_scopes(),
            block_extensions: default_block_extensions(),
        }
    }
}

fn default_components_dir() -> String {
    "content/components".to_string()
}
fn default_metadata_file() -> String {
    "content/blocks-metadata.toml".to_string()
}
fn default_output_file() -> String {
    "registry.json".to_string()
}
fn default_install_root() -> String {
    "/components/blocks".to_string()
}
fn default_schema() -> String {
    "https://ui.shadcn.com/schema/registry.json".to_string()
}
fn default_registry_name() -> String {
    "blocks".to_string()
}
fn default_homepage() -> String {
    "https://blocks.so".to_string()
}
fn default_author() -> String {
    "ephraim duncan <https://ephraimduncan.com>".to_string()
}
fn default_ui_prefix() -> String {
    "@/components/ui/".to_string()
}
fn default_ignored_prefixes() -> Vec<String> {
    vec![".".to_string(), "@/".to_string()]
}
fn default_framework_packages() -> Vec<String> {
    vec!["react".to_string(), "react-dom".to_string(), "next".to_string()]
}
fn default_framework_scopes() -> Vec<String> {
    vec!["@next".to_string()]
}
fn default_block_extensions() -> Vec<String> {
    vec!["tsx".to_string()]
}

impl Config {
    /// Absolute location of the components tree.
    pub fn components_root(&self) -> PathBuf {
        self.resolve(&self.paths.components_dir)
    }

    /// Absolute location of the metadata file.
    pub fn metadata_path(&self) -> PathBuf {
        self.resolve(&self.paths.metadata_file)
    }

    /// Absolute location of the registry output.
    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.paths.output_file)
    }

    /// Prefix written in front of every registry `path`: the components
    /// directory relative to the project root, with forward slashes.
    pub fn components_label(&self) -> String {
        self.relative_components_dir().unwrap_or_default()
    }

    /// `None` when the components directory is not inside the project root.
    fn relative_components_dir(&self) -> Option<String> {
        let root = self.components_root();
        let relative = root.strip_prefix(&self.project_root).ok()?;
        let mut parts = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(parts.join("/"))
    }

    fn resolve(&self, configured: &str) -> PathBuf {
        let path = PathBuf::from(configured);
        if path.is_absolute() {
            path
        } else {
            self.project_root.join(path)
        }
    }
}

pub const PROJECT_CONFIG_FILENAME: &str = "blocks.toml";

/// Loads the configuration for a run rooted at `root`.
///
/// `explicit` pins the config file; when absent the project file is searched
/// for from `root` upwards, falling back to defaults.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<Config> {
    let root = absolute(root)?;
    let root = root.as_path();
    let found = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!(BlocksError::Config(format!(
                    "Config file '{}' does not exist.",
                    path.display()
                ))));
            }
            Some(absolute(path)?)
        }
        None => find_project_config_path(root),
    };

    let mut config = match &found {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(path)?
        }
        None => {
            debug!(
                "No {} found in '{}' or its ancestors; using defaults.",
                PROJECT_CONFIG_FILENAME,
                root.display()
            );
            Config::default()
        }
    };

    config.project_root = found
        .as_deref()
        .and_then(Path::parent)
        .filter(|dir| !dir.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| root.to_path_buf());

    expand_config_paths(&mut config);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().context("Failed to determine the current directory")?;
    Ok(cwd.join(path))
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

fn expand_config_paths(config: &mut Config) {
    let paths = &mut config.paths;
    for field in [
        &mut paths.components_dir,
        &mut paths.metadata_file,
        &mut paths.output_file,
    ] {
        *field = shellexpand::tilde(field.as_str()).into_owned();
    }
    debug!("Expanded components directory: {}", paths.components_dir);
}

fn validate_config(config: &Config) -> Result<()> {
    let imports = &config.imports;
    if imports.ui_prefix.is_empty() {
        return Err(anyhow!(BlocksError::Config(
            "imports.ui_prefix must not be empty.".to_string()
        )));
    }
    if imports.block_extensions.is_empty() {
        return Err(anyhow!(BlocksError::Config(
            "imports.block_extensions must list at least one extension.".to_string()
        )));
    }
    if let Some(ext) = imports.block_extensions.iter().find(|e| e.starts_with('.')) {
        return Err(anyhow!(BlocksError::Config(format!(
            "Block extension '{}' must be given without the leading dot.",
            ext
        ))));
    }
    if config.relative_components_dir().is_none() {
        return Err(anyhow!(BlocksError::Config(format!(
            "paths.components_dir '{}' must lie inside the project root '{}'.",
            config.paths.components_dir,
            config.project_root.display()
        ))));
    }
    if config.paths.install_root.trim().is_empty() {
        return Err(anyhow!(BlocksError::Config(
            "paths.install_root must not be empty.".to_string()
        )));
    }
    for dir in &config.paths.preserve_dirs {
        if dir.is_empty() || Path::new(dir).is_absolute() || dir.contains("..") {
            return Err(anyhow!(BlocksError::Config(format!(
                "Invalid preserve_dirs entry '{}': expected a plain relative directory name.",
                dir
            ))));
        }
    }
    Ok(())
}

// --- Unit Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_deserialize_partial_toml() {
        let toml_content = r#"
            [paths]
            components_dir = "src/blocks"
            output_file = "public/r/registry.json"

            [imports]
            framework_packages = ["react"]
        "#;

        let config: Config = toml::from_str(toml_content).expect("Failed to parse TOML");

        assert_eq!(config.paths.components_dir, "src/blocks");
        assert_eq!(config.paths.output_file, "public/r/registry.json");
        assert_eq!(config.paths.metadata_file, default_metadata_file()); // Default
        assert_eq!(config.imports.framework_packages, vec!["react"]);
        assert_eq!(config.imports.ui_prefix, "@/components/ui/");
        assert_eq!(config.registry.homepage, "https://blocks.so");
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str("[paths]\nnope = 1\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_without_config_file() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();

        let config = load_config(root.path(), None).unwrap();
        assert_eq!(config.project_root, root.path());
        assert_eq!(
            config.components_root(),
            root.path().join("content/components")
        );
        assert_eq!(config.output_path(), root.path().join("registry.json"));
        assert_eq!(config.components_label(), "content/components");
    }

    #[test]
    fn test_config_found_in_ancestor_sets_project_root() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join(".git")).unwrap();
        fs::write(
            root.path().join(PROJECT_CONFIG_FILENAME),
            "[paths]\noutput_file = \"out/registry.json\"\n",
        )
        .unwrap();
        let nested = root.path().join("scripts/tools");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config(&nested, None).unwrap();
        assert_eq!(config.project_root, root.path());
        assert_eq!(
            config.output_path(),
            root.path().join("out/registry.json")
        );
    }

    #[test]
    fn test_search_stops_at_git_dir() {
        let outer = tempdir().unwrap();
        fs::write(
            outer.path().join(PROJECT_CONFIG_FILENAME),
            "[paths]\noutput_file = \"wrong.json\"\n",
        )
        .unwrap();
        let repo = outer.path().join("repo");
        fs::create_dir_all(repo.join(".git")).unwrap();

        let config = load_config(&repo, None).unwrap();
        assert_eq!(config.paths.output_file, "registry.json");
    }

    #[test]
    fn test_explicit_config_missing_is_error() {
        let root = tempdir().unwrap();
        let result = load_config(root.path(), Some(&root.path().join("absent.toml")));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("does not exist"));
    }

    #[test]
    fn test_path_expansion() {
        let mut config = Config::default();
        config.paths.components_dir = "~/blocks_test".to_string();
        expand_config_paths(&mut config);

        let home_dir = dirs::home_dir().unwrap();
        assert_eq!(
            config.paths.components_dir,
            home_dir.join("blocks_test").to_string_lossy()
        );
        assert_eq!(config.paths.output_file, "registry.json"); // Relative path unchanged
    }

    #[test]
    fn test_components_label_is_normalized_relative_path() {
        let root = tempdir().unwrap();
        fs::write(
            root.path().join(PROJECT_CONFIG_FILENAME),
            "[paths]\ncomponents_dir = \"./content/./components/\"\n",
        )
        .unwrap();

        let config = load_config(root.path(), None).unwrap();
        assert_eq!(config.components_label(), "content/components");
    }

    #[test]
    fn test_absolute_components_dir_inside_root_is_relativized() {
        let root = tempdir().unwrap();
        let absolute = root.path().join("src/blocks");
        fs::write(
            root.path().join(PROJECT_CONFIG_FILENAME),
            format!("[paths]\ncomponents_dir = {:?}\n", absolute.to_string_lossy()),
        )
        .unwrap();

        let config = load_config(root.path(), None).unwrap();
        assert_eq!(config.components_root(), absolute);
        assert_eq!(config.components_label(), "src/blocks");
    }

    #[test]
    fn test_components_dir_outside_root_is_rejected() {
        for components_dir in ["~/blocks_outside", "../shared/components", "/opt/blocks"] {
            let root = tempdir().unwrap();
            fs::write(
                root.path().join(PROJECT_CONFIG_FILENAME),
                format!("[paths]\ncomponents_dir = {:?}\n", components_dir),
            )
            .unwrap();

            let err = load_config(root.path(), None).unwrap_err();
            assert!(
                format!("{:#}", err).contains("must lie inside the project root"),
                "{} was accepted",
                components_dir
            );
        }
    }

    #[test]
    fn test_validate_config_rejects_empty_ui_prefix() {
        let mut config = Config::default();
        config.imports.ui_prefix.clear();
        let result = validate_config(&config);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ui_prefix"));
    }

    #[test]
    fn test_validate_config_rejects_dotted_extension() {
        let mut config = Config::default();
        config.imports.block_extensions = vec![".tsx".to_string()];
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_config_rejects_escaping_preserve_dir() {
        let mut config = Config::default();
        config.paths.preserve_dirs = vec!["../elsewhere".to_string()];
        assert!(validate_config(&config).is_err());
    }
}
