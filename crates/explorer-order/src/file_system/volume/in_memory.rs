//! In-memory volume for tests and embedding.

use super::{Volume, VolumeError, resolve_in_root};
use crate::file_system::{Entry, EntryKind};
use crate::ignore_poison::IgnorePoisonRw;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

/// A volume that keeps its tree in memory.
///
/// Listings come back in creation order, which stands in for the arbitrary order of a real
/// `readdir`.
pub struct InMemoryVolume {
    name: String,
    root: PathBuf,
    /// Absolute paths in creation order.
    nodes: RwLock<Vec<(PathBuf, EntryKind)>>,
}

impl InMemoryVolume {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
            nodes: RwLock::new(Vec::new()),
        }
    }

    /// Creates a volume from relative paths. A trailing `/` marks a directory; missing parent
    /// directories are created on the way.
    ///
    /// ```
    /// use explorer_order::{InMemoryVolume, Volume};
    /// use std::path::Path;
    ///
    /// let volume = InMemoryVolume::with_paths("work", "/work", &["src/", "src/main.rs", "README.md"]);
    /// assert!(volume.is_directory(Path::new("src")).unwrap());
    /// ```
    pub fn with_paths(name: impl Into<String>, root: impl Into<PathBuf>, paths: &[&str]) -> Self {
        let volume = Self::new(name, root);
        {
            let mut nodes = volume.nodes.write_ignore_poison();
            for raw in paths {
                let kind = if raw.ends_with('/') {
                    EntryKind::Directory
                } else {
                    EntryKind::File
                };
                let path = resolve_in_root(&volume.root, Path::new(raw.trim_end_matches('/')));
                insert_with_parents(&mut nodes, &volume.root, path, kind);
            }
        }
        volume
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        resolve_in_root(&self.root, path)
    }

    fn kind_of(nodes: &[(PathBuf, EntryKind)], root: &Path, path: &Path) -> Option<EntryKind> {
        if path == root {
            return Some(EntryKind::Directory);
        }
        nodes.iter().find(|(p, _)| p == path).map(|(_, kind)| *kind)
    }

    /// Checks that `path` is free and its parent is an existing directory.
    fn check_can_create(nodes: &[(PathBuf, EntryKind)], root: &Path, path: &Path) -> Result<(), VolumeError> {
        if Self::kind_of(nodes, root, path).is_some() {
            return Err(VolumeError::AlreadyExists(path.display().to_string()));
        }
        let parent = path.parent().unwrap_or(root);
        match Self::kind_of(nodes, root, parent) {
            Some(EntryKind::Directory) => Ok(()),
            Some(EntryKind::File) => Err(VolumeError::NotADirectory(parent.display().to_string())),
            None => Err(VolumeError::NotFound(parent.display().to_string())),
        }
    }

    fn insert(&self, path: &Path, kind: EntryKind) -> Result<(), VolumeError> {
        let abs_path = self.resolve(path);
        let mut nodes = self.nodes.write_ignore_poison();
        Self::check_can_create(&nodes, &self.root, &abs_path)?;
        nodes.push((abs_path, kind));
        Ok(())
    }
}

fn insert_with_parents(nodes: &mut Vec<(PathBuf, EntryKind)>, root: &Path, path: PathBuf, kind: EntryKind) {
    if path == root || nodes.iter().any(|(p, _)| *p == path) {
        return;
    }
    if let Some(parent) = path.parent()
        && parent.starts_with(root)
    {
        insert_with_parents(nodes, root, parent.to_path_buf(), EntryKind::Directory);
    }
    nodes.push((path, kind));
}

impl Volume for InMemoryVolume {
    fn name(&self) -> &str {
        &self.name
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<Entry>, VolumeError> {
        let abs_path = self.resolve(path);
        let nodes = self.nodes.read_ignore_poison();
        match Self::kind_of(&nodes, &self.root, &abs_path) {
            Some(EntryKind::Directory) => {}
            Some(EntryKind::File) => return Err(VolumeError::NotADirectory(abs_path.display().to_string())),
            None => return Err(VolumeError::NotFound(abs_path.display().to_string())),
        }

        Ok(nodes
            .iter()
            .filter(|(p, _)| p.parent() == Some(abs_path.as_path()))
            .map(|(p, kind)| Entry::from_path(p, *kind))
            .collect())
    }

    fn exists(&self, path: &Path) -> bool {
        let abs_path = self.resolve(path);
        Self::kind_of(&self.nodes.read_ignore_poison(), &self.root, &abs_path).is_some()
    }

    fn is_directory(&self, path: &Path) -> Result<bool, VolumeError> {
        let abs_path = self.resolve(path);
        Self::kind_of(&self.nodes.read_ignore_poison(), &self.root, &abs_path)
            .map(|kind| kind == EntryKind::Directory)
            .ok_or_else(|| VolumeError::NotFound(abs_path.display().to_string()))
    }

    fn create_file(&self, path: &Path, _content: &[u8]) -> Result<(), VolumeError> {
        self.insert(path, EntryKind::File)
    }

    fn create_directory(&self, path: &Path) -> Result<(), VolumeError> {
        self.insert(path, EntryKind::Directory)
    }

    fn delete(&self, path: &Path) -> Result<(), VolumeError> {
        let abs_path = self.resolve(path);
        if abs_path == self.root {
            return Err(VolumeError::PermissionDenied(abs_path.display().to_string()));
        }
        let mut nodes = self.nodes.write_ignore_poison();
        if Self::kind_of(&nodes, &self.root, &abs_path).is_none() {
            return Err(VolumeError::NotFound(abs_path.display().to_string()));
        }
        nodes.retain(|(p, _)| !p.starts_with(&abs_path));
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), VolumeError> {
        let from_abs = self.resolve(from);
        let to_abs = self.resolve(to);
        if from_abs == to_abs {
            return Ok(());
        }
        let mut nodes = self.nodes.write_ignore_poison();
        if from_abs == self.root || Self::kind_of(&nodes, &self.root, &from_abs).is_none() {
            return Err(VolumeError::NotFound(from_abs.display().to_string()));
        }
        if to_abs.starts_with(&from_abs) {
            return Err(VolumeError::IoError(format!(
                "Can't move {} into itself",
                from_abs.display()
            )));
        }
        Self::check_can_create(&nodes, &self.root, &to_abs)?;

        for (p, _) in nodes.iter_mut() {
            if let Ok(rest) = p.strip_prefix(&from_abs) {
                *p = if rest.as_os_str().is_empty() {
                    to_abs.clone()
                } else {
                    to_abs.join(rest)
                };
            }
        }
        Ok(())
    }
}
