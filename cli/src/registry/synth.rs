//! # blocks Registry Synthesis
//!
//! File: cli/src/registry/synth.rs
//!
//! ## Overview
//!
//! Combines metadata, walked files and extracted dependencies into one
//! manifest item per block, then assembles the items into the registry
//! document.
//!

use crate::core::config::{Config, RegistryConfig};
use crate::core::error::Result;
use crate::registry::discovery::{apply_metadata, discover_blocks, BlockIndex};
use crate::registry::extractor::DependencyExtractor;
use crate::registry::metadata::{load_metadata, MetadataMap};
use crate::registry::model::{
    BlockMetadata, DependencySet, Registry, RegistryItem, BLOCK_ITEM_TYPE,
};
use crate::registry::walker::{collect_block_files, BlockSource, WalkLayout};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// `fancy-card` → `Fancy Card`.
pub fn format_title(id: &str) -> String {
    id.split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// The description is always derived from the title.
pub fn describe(title: &str) -> String {
    format!("A {} block.", title.to_lowercase())
}

/// Metadata name when known, generated title otherwise.
pub fn resolve_title(id: &str, metadata: Option<&BlockMetadata>) -> String {
    match metadata {
        Some(meta) => meta.name.clone(),
        None => {
            warn!(
                "Metadata not found for block ID \"{}\". Using generated title.",
                id
            );
            format_title(id)
        }
    }
}

/// Builds the manifest item of one block, or `None` when it has no files.
pub fn synthesize_item(
    block: &BlockSource,
    title: String,
    author: &str,
    layout: &WalkLayout,
    extractor: &DependencyExtractor,
) -> Option<RegistryItem> {
    let files = collect_block_files(block, layout);
    if files.is_empty() {
        return None;
    }

    let mut deps = DependencySet::default();
    for file in &files {
        let absolute = source_location(block, layout, &file.path);
        deps.merge(extractor.extract(&absolute));
    }
    debug!(
        "Block \"{}\": {} file(s), {} internal and {} external dependencies",
        block.id,
        files.len(),
        deps.internal.len(),
        deps.external.len()
    );

    Some(RegistryItem {
        name: block.id.clone(),
        kind: BLOCK_ITEM_TYPE,
        description: describe(&title),
        title,
        author: author.to_string(),
        registry_dependencies: deps.internal.into_iter().collect(),
        dependencies: deps.external.into_iter().collect(),
        files,
    })
}

/// Maps a registry `path` back to the file on disk.
fn source_location(block: &BlockSource, layout: &WalkLayout, registry_path: &str) -> PathBuf {
    let relative = registry_path
        .strip_prefix(layout.components_label.as_str())
        .map(|rest| rest.trim_start_matches('/'))
        .unwrap_or(registry_path);
    if relative.is_empty() {
        block.root.clone()
    } else {
        layout.components_root.join(relative)
    }
}

/// Everything a run needs, derived once from the configuration.
#[derive(Debug, Clone)]
pub struct RegistryPipeline {
    layout: Arc<WalkLayout>,
    extractor: Arc<DependencyExtractor>,
    envelope: RegistryConfig,
    block_extensions: Vec<String>,
    metadata_path: PathBuf,
}

impl RegistryPipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            layout: Arc::new(WalkLayout {
                components_root: config.components_root(),
                components_label: config.components_label(),
                install_root: config.paths.install_root.clone(),
            }),
            extractor: Arc::new(DependencyExtractor::new(&config.imports)),
            envelope: config.registry.clone(),
            block_extensions: config.imports.block_extensions.clone(),
            metadata_path: config.metadata_path(),
        }
    }

    /// Loads block metadata. Any failure here is fatal for the run.
    pub fn load_metadata(&self) -> Result<MetadataMap> {
        let metadata = load_metadata(&self.metadata_path)?;
        info!(
            "Loaded {} metadata entries from {}",
            metadata.len(),
            self.metadata_path.display()
        );
        Ok(metadata)
    }

    /// Blocks on disk plus metadata-declared ones. An unreadable components
    /// root is logged and yields only the metadata-declared blocks.
    pub fn discover(&self, metadata: &MetadataMap) -> BlockIndex {
        let root = &self.layout.components_root;
        let mut blocks = match discover_blocks(root, &self.block_extensions) {
            Ok(blocks) => blocks,
            Err(e) => {
                error!("{:#}", e);
                BlockIndex::new()
            }
        };
        apply_metadata(&mut blocks, metadata, root, &self.block_extensions);
        info!("Discovered {} block(s) under {}", blocks.len(), root.display());
        blocks
    }

    /// Synthesizes one block on the calling thread.
    pub fn item(&self, block: &BlockSource, metadata: &MetadataMap) -> Option<RegistryItem> {
        let title = resolve_title(&block.id, metadata.get(&block.id));
        synthesize_item(
            block,
            title,
            &self.envelope.author,
            &self.layout,
            &self.extractor,
        )
    }

    /// Synthesizes every block on the blocking pool. Blocks without files,
    /// and blocks whose task fails, are logged and left out.
    pub async fn items(&self, blocks: BlockIndex, metadata: &MetadataMap) -> Vec<RegistryItem> {
        let mut handles = Vec::with_capacity(blocks.len());
        for block in blocks.into_values() {
            let title = resolve_title(&block.id, metadata.get(&block.id));
            let author = self.envelope.author.clone();
            let layout = Arc::clone(&self.layout);
            let extractor = Arc::clone(&self.extractor);
            let id = block.id.clone();
            let handle = tokio::task::spawn_blocking(move || {
                synthesize_item(&block, title, &author, &layout, &extractor)
            });
            handles.push((id, handle));
        }

        let mut items = Vec::with_capacity(handles.len());
        for (id, handle) in handles {
            match handle.await {
                Ok(Some(item)) => items.push(item),
                Ok(None) => warn!(
                    "Block \"{}\" yielded no files; omitting it from the registry.",
                    id
                ),
                Err(e) => error!("Error processing block \"{}\": {}; skipping it.", id, e),
            }
        }
        items
    }

    /// Wraps `items` in the envelope, ordered by name.
    pub fn assemble(&self, mut items: Vec<RegistryItem>) -> Registry {
        items.sort_by(|a, b| a.name.cmp(&b.name));
        Registry {
            schema: self.envelope.schema.clone(),
            name: self.envelope.name.clone(),
            homepage: self.envelope.homepage.clone(),
            items,
        }
    }

    /// The whole in-memory pass: metadata, discovery, synthesis, assembly.
    pub async fn generate(&self) -> Result<Registry> {
        let metadata = self.load_metadata()?;
        let blocks = self.discover(&metadata);
        let items = self.items(blocks, &metadata).await;
        Ok(self.assemble(items))
    }
}
