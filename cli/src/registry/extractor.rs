//! # blocks Dependency Extractor
//!
//! File: cli/src/registry/extractor.rs
//!
//! ## Overview
//!
//! Turns the import declarations of one source file into a `DependencySet`:
//! UI primitives (`@/components/ui/button` → `button`) become internal
//! references, published packages become external ones, and relative,
//! aliased and framework imports are dropped.
//!
//! A file that cannot be read or parsed is logged and contributes nothing,
//! so one bad file never stops the registry build.
//!

use crate::core::config::ImportsConfig;
use crate::core::error::{BlocksError, Result};
use crate::registry::imports::{parse_imports, Dialect};
use crate::registry::model::DependencySet;
use anyhow::Context;
use std::fs;
use std::path::Path;
use tracing::{debug, error, trace};

/// Extensions of files whose imports are read.
const SOURCE_EXTENSIONS: &[&str] = &["ts", "tsx", "js", "jsx", "mts", "cts", "mjs", "cjs"];

/// How a single module specifier contributes to a block's dependencies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportClass {
    /// A shared UI primitive, by name (`@/components/ui/button` → `button`).
    Internal(String),
    /// A published package to install (`lucide-react`).
    External(String),
    /// Relative, aliased or framework import.
    Ignored,
}

/// Classifies imports and collects a file's `DependencySet`.
///
/// Holds only the immutable rules, so one extractor is shared by every block
/// and every result depends only on the file being read.
#[derive(Debug, Clone)]
pub struct DependencyExtractor {
    ui_prefix: String,
    ignored_prefixes: Vec<String>,
    framework_packages: Vec<String>,
    framework_scopes: Vec<String>,
}

impl DependencyExtractor {
    pub fn new(rules: &ImportsConfig) -> Self {
        Self {
            ui_prefix: rules.ui_prefix.clone(),
            ignored_prefixes: rules.ignored_prefixes.clone(),
            framework_packages: rules.framework_packages.clone(),
            framework_scopes: rules
                .framework_scopes
                .iter()
                .map(|scope| scope.trim_end_matches('/').to_string())
                .collect(),
        }
    }

    pub fn classify(&self, specifier: &str) -> ImportClass {
        if specifier.is_empty() {
            return ImportClass::Ignored;
        }
        if specifier.starts_with(&self.ui_prefix) {
            return match specifier.rsplit('/').next() {
                Some(name) if !name.is_empty() => ImportClass::Internal(name.to_string()),
                _ => ImportClass::Ignored,
            };
        }
        if self
            .ignored_prefixes
            .iter()
            .any(|prefix| specifier.starts_with(prefix.as_str()))
            || self.is_framework(specifier)
        {
            return ImportClass::Ignored;
        }
        ImportClass::External(specifier.to_string())
    }

    fn is_framework(&self, specifier: &str) -> bool {
        let within = |root: &str| {
            specifier == root
                || specifier
                    .strip_prefix(root)
                    .is_some_and(|rest| rest.starts_with('/'))
        };
        self.framework_packages.iter().any(|pkg| within(pkg))
            || self.framework_scopes.iter().any(|scope| within(scope))
    }

    /// Dependencies declared by `source`.
    pub fn extract_source(
        &self,
        source: &str,
        dialect: Dialect,
    ) -> std::result::Result<DependencySet, BlocksError> {
        let mut deps = DependencySet::default();
        for decl in parse_imports(source, dialect)? {
            trace!(
                "Import at line {}: {}{}",
                decl.line,
                decl.specifier,
                if decl.type_only { " (type-only)" } else { "" }
            );
            match self.classify(&decl.specifier) {
                ImportClass::Internal(name) => {
                    deps.internal.insert(name);
                }
                ImportClass::External(package) => {
                    deps.external.insert(package);
                }
                ImportClass::Ignored => {}
            }
        }
        Ok(deps)
    }

    /// Reads and parses the file at `path`.
    pub fn try_extract(&self, path: &Path) -> Result<DependencySet> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file {}", path.display()))?;
        self.extract_source(&source, Dialect::for_path(path))
            .with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Like `try_extract`, but a read or parse failure is logged and counts
    /// as no dependencies. Files without a source extension contribute nothing.
    pub fn extract(&self, path: &Path) -> DependencySet {
        if !is_source_file(path) {
            debug!("Not a source file, skipping import scan: {}", path.display());
            return DependencySet::default();
        }
        match self.try_extract(path) {
            Ok(deps) => {
                if deps.is_empty() {
                    debug!("No dependencies found in {}", path.display());
                }
                deps
            }
            Err(e) => {
                error!("Error parsing file {}: {:#}", path.display(), e);
                DependencySet::default()
            }
        }
    }
}

pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn extractor() -> DependencyExtractor {
        DependencyExtractor::new(&ImportsConfig::default())
    }

    #[test]
    fn classification_rules() {
        let ex = extractor();
        assert_eq!(
            ex.classify("@/components/ui/button"),
            ImportClass::Internal("button".into())
        );
        assert_eq!(
            ex.classify("@/components/ui/forms/input-otp"),
            ImportClass::Internal("input-otp".into())
        );
        assert_eq!(
            ex.classify("lucide-react"),
            ImportClass::External("lucide-react".into())
        );
        assert_eq!(
            ex.classify("@radix-ui/react-slot"),
            ImportClass::External("@radix-ui/react-slot".into())
        );
        for ignored in [
            "react",
            "react/jsx-runtime",
            "react-dom",
            "next",
            "next/link",
            "@next/font/google",
            "./foo",
            "../shared/util",
            "@/lib/utils",
            "@/components/ui/",
        ] {
            assert_eq!(ex.classify(ignored), ImportClass::Ignored, "{ignored}");
        }
    }

    #[test]
    fn framework_match_is_by_package_not_prefix() {
        let ex = extractor();
        assert_eq!(
            ex.classify("react-hook-form"),
            ImportClass::External("react-hook-form".into())
        );
        assert_eq!(
            ex.classify("next-themes"),
            ImportClass::External("next-themes".into())
        );
    }

    #[test]
    fn extract_source_deduplicates() {
        let source = r#"
import { Button } from "@/components/ui/button";
import { buttonVariants } from "@/components/ui/button";
import { Check, Copy } from "lucide-react";
import { X } from "lucide-react";
import { useState } from "react";
import { cn } from "@/lib/utils";
import { Helper } from "./helper";
"#;
        let deps = extractor().extract_source(source, Dialect::Tsx).unwrap();
        assert_eq!(deps.internal.into_iter().collect::<Vec<_>>(), vec!["button"]);
        assert_eq!(
            deps.external.into_iter().collect::<Vec<_>>(),
            vec!["lucide-react"]
        );
    }

    fn external(deps: &DependencySet) -> Vec<&str> {
        deps.external.iter().map(String::as_str).collect()
    }

    #[test]
    fn jsx_text_does_not_hide_dependencies() {
        let ex = extractor();
        let cases = [
            "import { Check } from \"lucide-react\";\nexport function A({ a }) {\n  return <p>It's {a ? 'x' : 'y'}</p>;\n}\n",
            "import { Check } from \"lucide-react\";\nexport const B = () => <p>Press ` to open</p>;\n",
            "import { Check } from \"lucide-react\";\nexport const C = ({ x }) => <p>5 /* 2 {x}</p>;\n",
        ];
        for source in cases {
            let deps = ex.extract_source(source, Dialect::Tsx).unwrap();
            assert_eq!(external(&deps), vec!["lucide-react"], "{source}");
        }
    }

    #[test]
    fn jsx_text_file_keeps_dependencies() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hint.tsx");
        fs::write(
            &path,
            "import { Badge } from \"@/components/ui/badge\";\nimport { Check } from \"lucide-react\";\nexport function Hint({ a }) {\n  return <Badge>It's {a ? \"on\" : \"off\"} /* ` */</Badge>;\n}\n",
        )
        .unwrap();

        let deps = extractor().extract(&path);
        assert_eq!(external(&deps), vec!["lucide-react"]);
        assert!(deps.internal.contains("badge"));
    }

    #[test]
    fn malformed_file_yields_empty_set() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.tsx");
        fs::write(&path, "import { Button } from \"lucide-react\";\n/* unterminated").unwrap();

        let ex = extractor();
        assert!(ex.try_extract(&path).is_err());
        assert!(ex.extract(&path).is_empty());
    }

    #[test]
    fn missing_and_non_source_files_yield_empty_set() {
        let dir = tempdir().unwrap();
        let ex = extractor();
        assert!(ex.extract(&dir.path().join("missing.tsx")).is_empty());

        let css = dir.path().join("styles.css");
        fs::write(&css, "import x from \"not-js\";").unwrap();
        assert!(ex.extract(&css).is_empty());
    }

    #[test]
    fn results_do_not_leak_between_files() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.tsx");
        let b = dir.path().join("b.tsx");
        fs::write(&a, "import { motion } from \"framer-motion\";").unwrap();
        fs::write(&b, "import { Badge } from \"@/components/ui/badge\";").unwrap();

        let ex = extractor();
        let first = ex.extract(&a);
        let second = ex.extract(&b);
        assert!(first.internal.is_empty());
        assert!(second.external.is_empty());
        assert!(second.internal.contains("badge"));
    }
}
