//! # blocks Install Tree Printer
//!
//! File: cli/src/commands/registry/tree_printer.rs
//!
//! ## Overview
//!
//! Renders a list of slash-separated install targets as a `tree`-style
//! listing, so `blocks registry show` can display where a block's files land
//! in the consuming project. The paths are virtual: nothing is read from disk.
//!
//! ```text
//! /components/blocks/
//! └── file-upload-02
//!     ├── file-upload-02.tsx
//!     └── parts
//!         └── dropzone.tsx
//! ```
//!
//! Directories are printed in bold (ANSI), files in plain text. Siblings are
//! ordered directories first, then by name.
//!
use std::collections::BTreeMap;
use std::fmt::Write as FmtWrite;

const TEE: &str = "├── ";
const ELBOW: &str = "└── ";
const PIPE: &str = "│   ";
const SPACER: &str = "    ";
const BOLD_START: &str = "\x1b[1m";
const BOLD_END: &str = "\x1b[0m";

#[derive(Default)]
struct Node {
    children: BTreeMap<String, Node>,
}

impl Node {
    fn is_dir(&self) -> bool {
        !self.children.is_empty()
    }

    fn insert(&mut self, segments: &[&str]) {
        if let Some((first, rest)) = segments.split_first() {
            self.children
                .entry((*first).to_string())
                .or_default()
                .insert(rest);
        }
    }
}

/// Renders `paths` under a heading line for `root`. Paths starting with
/// `root` are shown relative to it; others are shown in full.
pub fn render_path_tree(root: &str, paths: &[String]) -> String {
    let root = root.trim_end_matches('/');
    let mut tree = Node::default();
    for path in paths {
        let relative = path
            .strip_prefix(root)
            .filter(|rest| rest.starts_with('/'))
            .unwrap_or(path.as_str());
        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        tree.insert(&segments);
    }

    let mut output = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(output, "{}{}/{}", BOLD_START, root, BOLD_END);
    write_children(&tree, &mut String::new(), &mut output);
    output
}

fn write_children(node: &Node, prefix: &mut String, output: &mut String) {
    let mut entries: Vec<(&String, &Node)> = node.children.iter().collect();
    entries.sort_by(|a, b| b.1.is_dir().cmp(&a.1.is_dir()).then_with(|| a.0.cmp(b.0)));

    let count = entries.len();
    for (index, (name, child)) in entries.into_iter().enumerate() {
        let is_last = index + 1 == count;
        let connector = if is_last { ELBOW } else { TEE };
        if child.is_dir() {
            let _ = writeln!(output, "{}{}{}{}{}", prefix, connector, BOLD_START, name, BOLD_END);
            let extension = if is_last { SPACER } else { PIPE };
            prefix.push_str(extension);
            write_children(child, prefix, output);
            prefix.truncate(prefix.len() - extension.len());
        } else {
            let _ = writeln!(output, "{}{}{}", prefix, connector, name);
        }
    }
}
