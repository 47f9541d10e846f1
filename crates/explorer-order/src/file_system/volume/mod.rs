//! Volume trait for abstracting file system access.
//!
//! The listing service and the commands only talk to a `Volume`:
//! - `LocalVolume`: the real file system under a workspace root
//! - `InMemoryVolume`: an in-memory tree for tests and embedding

mod in_memory;
mod local;

pub use in_memory::InMemoryVolume;
pub use local::LocalVolume;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::file_system::Entry;

/// Error type for volume operations. Messages are shown to the user verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind", content = "message")]
pub enum VolumeError {
    /// Path not found
    NotFound(String),
    /// Permission denied
    PermissionDenied(String),
    /// Path already exists
    AlreadyExists(String),
    /// Expected a directory
    NotADirectory(String),
    /// Operation not supported by this volume type
    NotSupported,
    /// Generic I/O error
    IoError(String),
}

impl std::fmt::Display for VolumeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "Path not found: {}", path),
            Self::PermissionDenied(path) => write!(f, "Permission denied: {}", path),
            Self::AlreadyExists(path) => write!(f, "Already exists: {}", path),
            Self::NotADirectory(path) => write!(f, "Not a directory: {}", path),
            Self::NotSupported => write!(f, "Operation not supported"),
            Self::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for VolumeError {}

impl From<std::io::Error> for VolumeError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists(err.to_string()),
            std::io::ErrorKind::NotADirectory => Self::NotADirectory(err.to_string()),
            _ => Self::IoError(err.to_string()),
        }
    }
}

/// Trait for volume file system operations.
///
/// Paths may be absolute (inside the volume root) or relative to the volume root.
/// Returned entries always carry absolute paths.
pub trait Volume: Send + Sync {
    /// Display name for this volume.
    fn name(&self) -> &str;

    /// Root path of this volume.
    fn root(&self) -> &Path;

    // ========================================
    // Required: All volumes must implement
    // ========================================

    /// Lists the direct children of a directory, in no particular order.
    fn list_directory(&self, path: &Path) -> Result<Vec<Entry>, VolumeError>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Returns Ok(true) if directory, Ok(false) if file, Err if the path doesn't exist.
    fn is_directory(&self, path: &Path) -> Result<bool, VolumeError>;

    // ========================================
    // Optional: Default to NotSupported
    // ========================================

    /// Creates a file with the given content. Fails if it already exists.
    fn create_file(&self, path: &Path, content: &[u8]) -> Result<(), VolumeError> {
        let _ = (path, content);
        Err(VolumeError::NotSupported)
    }

    /// Creates a directory. Fails if it already exists.
    fn create_directory(&self, path: &Path) -> Result<(), VolumeError> {
        let _ = path;
        Err(VolumeError::NotSupported)
    }

    /// Deletes a file, or a directory with everything in it.
    fn delete(&self, path: &Path) -> Result<(), VolumeError> {
        let _ = path;
        Err(VolumeError::NotSupported)
    }

    /// Renames/moves a file or directory within this volume.
    fn rename(&self, from: &Path, to: &Path) -> Result<(), VolumeError> {
        let _ = (from, to);
        Err(VolumeError::NotSupported)
    }

    // ========================================
    // Watching: Optional, default no-op
    // ========================================

    /// Returns true if files under this volume live on disk, so the config next to them can be
    /// watched for changes.
    fn supports_watching(&self) -> bool {
        false
    }
}

/// Resolves a volume path against `root`.
///
/// Empty paths or "." resolve to the root itself. Absolute paths already under the root are used
/// as-is; other absolute paths are treated as relative to the root.
pub(crate) fn resolve_in_root(root: &Path, path: &Path) -> PathBuf {
    if path.as_os_str().is_empty() || path == Path::new(".") {
        root.to_path_buf()
    } else if path.is_absolute() {
        if path.starts_with(root) || root == Path::new("/") {
            path.to_path_buf()
        } else {
            let relative = path.strip_prefix("/").unwrap_or(path);
            root.join(relative)
        }
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod in_memory_test;
#[cfg(test)]
mod local_test;
