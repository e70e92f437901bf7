//! # blocks Registry Data Model
//!
//! File: cli/src/registry/model.rs
//!
//! ## Overview
//!
//! Types shared by the registry pipeline: block metadata coming in and the
//! shadcn manifest items going out. `Registry::to_json` renders the final
//! document as pretty JSON.
//!

use serde::Serialize;
use std::collections::BTreeSet;

/// The `type` value the installer expects on items and files.
pub const BLOCK_ITEM_TYPE: &str = "registry:block";

/// How a block is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// A single source file, `{category}/{blockId}.tsx`.
    File,
    /// A directory of files, `{category}/{blockId}/`.
    Directory,
}

impl ContentType {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "file" => Some(Self::File),
            "directory" => Some(Self::Directory),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Directory => f.write_str("directory"),
        }
    }
}

/// One validated metadata record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMetadata {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub content_type: Option<ContentType>,
    pub iframe_height: Option<String>,
}

/// A file to install, as written into the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Source path, prefixed with the components directory label.
    pub path: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Install destination inside the consuming project.
    pub target: String,
}

impl FileEntry {
    pub fn new(path: String, target: String) -> Self {
        Self {
            path,
            kind: BLOCK_ITEM_TYPE,
            target,
        }
    }
}

/// Internal primitive and external package references of one file or block.
/// Ordered sets, so iteration is already the serialized order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencySet {
    pub internal: BTreeSet<String>,
    pub external: BTreeSet<String>,
}

impl DependencySet {
    /// Set union of `other` into `self`.
    pub fn merge(&mut self, other: DependencySet) {
        self.internal.extend(other.internal);
        self.external.extend(other.external);
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty() && self.external.is_empty()
    }
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryItem {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub description: String,
    pub author: String,
    pub registry_dependencies: Vec<String>,
    pub dependencies: Vec<String>,
    pub files: Vec<FileEntry>,
}

/// The full registry document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registry {
    #[serde(rename = "$schema")]
    pub schema: String,
    pub name: String,
    pub homepage: String,
    pub items: Vec<RegistryItem>,
}

impl Registry {
    /// Canonical serialization: 2-space indented JSON plus a trailing newline.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_set_union() {
        let mut a = DependencySet::default();
        a.internal.insert("button".into());
        a.external.insert("lucide-react".into());

        let mut b = DependencySet::default();
        b.internal.insert("button".into());
        b.internal.insert("input".into());
        b.external.insert("date-fns".into());

        a.merge(b);
        assert_eq!(
            a.internal.iter().collect::<Vec<_>>(),
            vec!["button", "input"]
        );
        assert_eq!(
            a.external.iter().collect::<Vec<_>>(),
            vec!["date-fns", "lucide-react"]
        );
    }

    #[test]
    fn registry_json_field_names() {
        let registry = Registry {
            schema: "https://ui.shadcn.com/schema/registry.json".into(),
            name: "blocks".into(),
            homepage: "https://blocks.so".into(),
            items: vec![RegistryItem {
                name: "login-01".into(),
                kind: BLOCK_ITEM_TYPE,
                title: "Login 01".into(),
                description: "A login 01 block.".into(),
                author: "someone".into(),
                registry_dependencies: vec!["button".into()],
                dependencies: vec![],
                files: vec![FileEntry::new(
                    "content/components/login/login-01.tsx".into(),
                    "/components/blocks/login-01.tsx".into(),
                )],
            }],
        };

        let json = registry.to_json().unwrap();
        assert!(json.starts_with("{\n  \"$schema\": "));
        assert!(json.ends_with("}\n"));
        assert!(json.contains("\"registryDependencies\": [\n        \"button\"\n      ]"));
        assert!(json.contains("\"dependencies\": []"));
        assert!(json.contains("\"type\": \"registry:block\""));

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value["items"][0]["files"][0]["target"],
            "/components/blocks/login-01.tsx"
        );
    }

    #[test]
    fn content_type_parse() {
        assert_eq!(ContentType::parse("file"), Some(ContentType::File));
        assert_eq!(ContentType::parse("directory"), Some(ContentType::Directory));
        assert_eq!(ContentType::parse("folder"), None);
    }
}
