//! Builds and prints ordered trees.

use explorer_order::{Entry, EntryKind, TreeListingService, VolumeError};
use serde::Serialize;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// One entry with its ordered children, down to the requested depth.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub name: String,
    pub kind: EntryKind,
    pub path: PathBuf,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TreeNode>,
}

impl From<Entry> for TreeNode {
    fn from(entry: Entry) -> Self {
        Self {
            name: entry.name,
            kind: entry.kind,
            path: entry.path,
            children: Vec::new(),
        }
    }
}

/// Lists `dir` and its subdirectories, each in policy order.
///
/// `depth` 1 lists `dir` only. A subdirectory that can't be listed is logged and left empty.
pub fn build_tree(service: &TreeListingService, dir: &Path, depth: usize) -> Result<Vec<TreeNode>, VolumeError> {
    let entries = service.list(dir)?;
    let mut nodes = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut node = TreeNode::from(entry);
        if node.kind == EntryKind::Directory && depth > 1 {
            match build_tree(service, &node.path, depth - 1) {
                Ok(children) => node.children = children,
                Err(e) => log::warn!("Skipping {}: {}", node.path.display(), e),
            }
        }
        nodes.push(node);
    }
    Ok(nodes)
}

/// Renders entries one per line. Directories get a trailing `/`.
pub fn render_list(entries: &[Entry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "{}{}", entry.name, suffix(entry.kind));
    }
    out
}

/// Renders a tree with box-drawing guides.
pub fn render_tree(root_label: &str, nodes: &[TreeNode]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", root_label);
    render_children(nodes, "", &mut out);
    out
}

fn render_children(nodes: &[TreeNode], prefix: &str, out: &mut String) {
    for (index, node) in nodes.iter().enumerate() {
        let last = index + 1 == nodes.len();
        let (branch, indent) = if last { ("└── ", "    ") } else { ("├── ", "│   ") };
        let _ = writeln!(out, "{}{}{}{}", prefix, branch, node.name, suffix(node.kind));
        render_children(&node.children, &format!("{}{}", prefix, indent), out);
    }
}

fn suffix(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Directory => "/",
        EntryKind::File => "",
    }
}
