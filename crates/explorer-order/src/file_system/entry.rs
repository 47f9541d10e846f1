//! Directory entry as handed to the tree view.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Whether an entry is a directory or a file.
///
/// Symlinks take the kind of their target; broken symlinks are files.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum EntryKind {
    Directory,
    File,
}

/// One child of a listed directory. Rebuilt on every listing, never cached.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub name: String,
    pub kind: EntryKind,
    /// Absolute path.
    pub path: PathBuf,
}

impl Entry {
    pub fn new(name: impl Into<String>, kind: EntryKind, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            kind,
            path: path.into(),
        }
    }

    /// Builds an entry named after the last component of `path`.
    pub fn from_path(path: &Path, kind: EntryKind) -> Self {
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());
        Self::new(name, kind, path)
    }

    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}
