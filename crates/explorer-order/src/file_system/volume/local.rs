//! Local file system volume rooted at the workspace directory.

use super::{Volume, VolumeError, resolve_in_root};
use crate::file_system::Entry;
use crate::file_system::listing::read_directory;
use std::fs;
use std::path::{Path, PathBuf};

/// A volume backed by the local file system, with the workspace directory as its root.
pub struct LocalVolume {
    name: String,
    root: PathBuf,
}

impl LocalVolume {
    /// Creates a volume for the given root. The name defaults to the root's last component.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let name = root
            .file_name()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| root.to_string_lossy().to_string());
        Self { name, root }
    }

    pub(super) fn resolve(&self, path: &Path) -> PathBuf {
        resolve_in_root(&self.root, path)
    }
}

impl Volume for LocalVolume {
    fn name(&self) -> &str {
        &self.name
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn list_directory(&self, path: &Path) -> Result<Vec<Entry>, VolumeError> {
        let abs_path = self.resolve(path);
        read_directory(&abs_path).map_err(VolumeError::from)
    }

    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so broken symlinks still count as existing
        fs::symlink_metadata(self.resolve(path)).is_ok()
    }

    fn is_directory(&self, path: &Path) -> Result<bool, VolumeError> {
        let metadata = fs::metadata(self.resolve(path))?;
        Ok(metadata.is_dir())
    }

    fn create_file(&self, path: &Path, content: &[u8]) -> Result<(), VolumeError> {
        use std::io::Write;

        let abs_path = self.resolve(path);
        let mut file = fs::OpenOptions::new().write(true).create_new(true).open(&abs_path)?;
        file.write_all(content)?;
        Ok(())
    }

    fn create_directory(&self, path: &Path) -> Result<(), VolumeError> {
        fs::create_dir(self.resolve(path))?;
        Ok(())
    }

    fn delete(&self, path: &Path) -> Result<(), VolumeError> {
        let abs_path = self.resolve(path);
        let metadata = fs::symlink_metadata(&abs_path)?;
        if metadata.is_dir() {
            fs::remove_dir_all(&abs_path)?;
        } else {
            fs::remove_file(&abs_path)?;
        }
        Ok(())
    }

    fn rename(&self, from: &Path, to: &Path) -> Result<(), VolumeError> {
        let from_abs = self.resolve(from);
        let to_abs = self.resolve(to);
        // fs::rename silently replaces files on POSIX
        if from_abs != to_abs && fs::symlink_metadata(&to_abs).is_ok() {
            return Err(VolumeError::AlreadyExists(to_abs.display().to_string()));
        }
        fs::rename(&from_abs, &to_abs)?;
        Ok(())
    }

    fn supports_watching(&self) -> bool {
        true
    }
}
