//! # blocks Block Metadata Loader
//!
//! File: cli/src/registry/metadata.rs
//!
//! ## Overview
//!
//! Metadata is a declarative data file listing one record per block:
//!
//! ```toml
//! [[blocks]]
//! id = "login-01"
//! name = "Login 01"
//! category = "login"
//! type = "file"
//! iframe_height = "600px"
//! ```
//!
//! A `.json` file holding either a top-level array or an object with a
//! `blocks` array is accepted as well (`contentType` and `iframeHeight` are
//! accepted as aliases there). A file that cannot be read or parsed is fatal;
//! individual malformed records are skipped with a warning.
//!

use crate::core::error::{BlocksError, Result};
use crate::registry::model::{BlockMetadata, ContentType};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Block id to validated metadata.
pub type MetadataMap = BTreeMap<String, BlockMetadata>;

#[derive(Deserialize, Debug)]
struct RawBlockMetadata {
    id: Option<String>,
    name: Option<String>,
    category: Option<String>,
    #[serde(rename = "type", alias = "contentType")]
    content_type: Option<String>,
    #[serde(alias = "iframeHeight")]
    iframe_height: Option<String>,
}

/// Loads and validates the metadata file at `path`.
///
/// # Errors
///
/// `BlocksError::Metadata` when the file is missing, unreadable, not valid
/// TOML/JSON, or has no list of records.
pub fn load_metadata(path: &Path) -> Result<MetadataMap> {
    let fail = |reason: String| BlocksError::Metadata {
        path: path.display().to_string(),
        reason,
    };

    let content = fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
    let records = parse_records(path, &content).map_err(fail)?;
    debug!("Read {} metadata records from {}", records.len(), path.display());

    Ok(collect_metadata(records, path))
}

fn parse_records(path: &Path, content: &str) -> std::result::Result<Vec<Value>, String> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let document: Value = if is_json {
        serde_json::from_str(content).map_err(|e| e.to_string())?
    } else {
        let table: toml::Table = toml::from_str(content).map_err(|e| e.to_string())?;
        serde_json::to_value(table).map_err(|e| e.to_string())?
    };

    match document {
        Value::Array(records) => Ok(records),
        Value::Object(mut root) => match root.remove("blocks") {
            Some(Value::Array(records)) => Ok(records),
            Some(_) => Err("expected `blocks` to be an array".to_string()),
            None => Err("expected a `blocks` array of block records".to_string()),
        },
        _ => Err("expected an array of block records".to_string()),
    }
}

fn collect_metadata(records: Vec<Value>, path: &Path) -> MetadataMap {
    let mut map = MetadataMap::new();

    for (index, record) in records.into_iter().enumerate() {
        let raw: RawBlockMetadata = match serde_json::from_value(record.clone()) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "Invalid metadata entry #{} in {}: {} ({})",
                    index,
                    path.display(),
                    record,
                    e
                );
                continue;
            }
        };

        let (id, name) = match (non_empty(raw.id), non_empty(raw.name)) {
            (Some(id), Some(name)) => (id, name),
            _ => {
                warn!(
                    "Invalid metadata entry #{} in {} (missing id or name): {}",
                    index,
                    path.display(),
                    record
                );
                continue;
            }
        };

        let content_type = raw.content_type.as_deref().and_then(|value| {
            let parsed = ContentType::parse(value);
            if parsed.is_none() {
                warn!(
                    "Metadata entry '{}' has unknown type '{}'; expected 'file' or 'directory'.",
                    id, value
                );
            }
            parsed
        });

        if map.contains_key(&id) {
            warn!(
                "Duplicate metadata entry for block ID \"{}\" in {}; keeping the first.",
                id,
                path.display()
            );
            continue;
        }

        map.insert(
            id.clone(),
            BlockMetadata {
                id,
                name,
                category: non_empty(raw.category),
                content_type,
                iframe_height: raw.iframe_height,
            },
        );
    }

    map
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
