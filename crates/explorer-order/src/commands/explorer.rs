//! Commands the tree exposes to the user.
//!
//! Every mutating command validates first, then asks the volume, then invalidates the affected
//! subtree. A failure is shown through the view, returned, and leaves the tree untouched.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use super::error::{CommandAction, CommandError};
use super::open_file::{ClickTracker, OpenRequest};
use crate::file_system::listing::TreeListingService;
use crate::file_system::validation::validate_child;
use crate::file_system::volume::{Volume, VolumeError};
use crate::ignore_poison::IgnorePoison;

pub struct ExplorerCommands {
    service: Arc<TreeListingService>,
    clicks: Mutex<ClickTracker>,
}

impl ExplorerCommands {
    pub fn new(service: Arc<TreeListingService>) -> Self {
        Self {
            service,
            clicks: Mutex::new(ClickTracker::new()),
        }
    }

    pub fn service(&self) -> &Arc<TreeListingService> {
        &self.service
    }

    fn volume(&self) -> &dyn Volume {
        self.service.volume().as_ref()
    }

    /// Re-reads the config and invalidates the whole tree.
    pub fn refresh(&self) -> Result<(), CommandError> {
        self.service.refresh(None).map_err(|e| self.fail(e.into()))
    }

    /// Creates an empty file named `name` in `target`, or next to it if `target` is a file.
    pub fn create_file(&self, target: &Path, name: &str) -> Result<PathBuf, CommandError> {
        let action = CommandAction::CreateFile;
        let new_path = self.prepare_create(action, target, name)?;
        self.volume()
            .create_file(&new_path, &[])
            .map_err(|error| self.fail(CommandError::Volume { action, error }))?;
        self.finish(action, &new_path);
        Ok(new_path)
    }

    /// Creates a folder named `name` in `target`, or next to it if `target` is a file.
    pub fn create_folder(&self, target: &Path, name: &str) -> Result<PathBuf, CommandError> {
        let action = CommandAction::CreateFolder;
        let new_path = self.prepare_create(action, target, name)?;
        self.volume()
            .create_directory(&new_path)
            .map_err(|error| self.fail(CommandError::Volume { action, error }))?;
        self.finish(action, &new_path);
        Ok(new_path)
    }

    /// Renames a file or folder within its parent. Returns the new path.
    pub fn rename(&self, path: &Path, new_name: &str) -> Result<PathBuf, CommandError> {
        let path = self.service.absolute(path);
        let action = match self.volume().is_directory(&path) {
            Ok(true) => CommandAction::RenameFolder,
            Ok(false) => CommandAction::RenameFile,
            Err(error) => {
                return Err(self.fail(CommandError::Volume {
                    action: CommandAction::RenameFile,
                    error,
                }));
            }
        };
        let parent = self.parent_of(action, &path)?;

        validate_child(&parent, new_name).map_err(|error| self.fail(CommandError::Validation { action, error }))?;
        let new_path = parent.join(new_name);
        if new_path == path {
            return Ok(new_path);
        }
        if self.volume().exists(&new_path) {
            return Err(self.fail(CommandError::Conflict { action, path: new_path }));
        }

        self.volume()
            .rename(&path, &new_path)
            .map_err(|error| self.fail(CommandError::Volume { action, error }))?;
        self.finish(action, &new_path);
        Ok(new_path)
    }

    /// Deletes a file, or a folder with everything in it.
    pub fn delete(&self, path: &Path) -> Result<(), CommandError> {
        let path = self.service.absolute(path);
        let action = match self.volume().is_directory(&path) {
            Ok(true) => CommandAction::DeleteFolder,
            Ok(false) => CommandAction::DeleteFile,
            Err(error) => {
                return Err(self.fail(CommandError::Volume {
                    action: CommandAction::DeleteFile,
                    error,
                }));
            }
        };
        self.parent_of(action, &path)?;

        self.volume()
            .delete(&path)
            .map_err(|error| self.fail(CommandError::Volume { action, error }))?;
        self.finish(action, &path);
        Ok(())
    }

    /// Turns a click on `path` into an open request. A path that no longer exists opens nothing.
    pub fn open(&self, path: &Path) -> Option<OpenRequest> {
        self.open_at(path, Instant::now())
    }

    pub(crate) fn open_at(&self, path: &Path, now: Instant) -> Option<OpenRequest> {
        let path = self.service.absolute(path);
        if !self.volume().exists(&path) {
            log::debug!("open: {} no longer exists", path.display());
            return None;
        }
        let mode = self.clicks.lock_ignore_poison().register(&path, now);
        Some(OpenRequest { path, mode })
    }

    /// Directory a new entry goes into, and the full path of that entry.
    fn prepare_create(&self, action: CommandAction, target: &Path, name: &str) -> Result<PathBuf, CommandError> {
        let target = self.service.absolute(target);
        let dir = match self.volume().is_directory(&target) {
            Ok(true) => target,
            Ok(false) => self.parent_of(action, &target)?,
            Err(error) => return Err(self.fail(CommandError::Volume { action, error })),
        };

        validate_child(&dir, name).map_err(|error| self.fail(CommandError::Validation { action, error }))?;
        let new_path = dir.join(name);
        if self.volume().exists(&new_path) {
            return Err(self.fail(CommandError::Conflict { action, path: new_path }));
        }
        Ok(new_path)
    }

    /// The parent of an entry inside the workspace. The workspace root itself can't be touched.
    fn parent_of(&self, action: CommandAction, path: &Path) -> Result<PathBuf, CommandError> {
        let root = self.service.workspace_root();
        match path.parent() {
            Some(parent) if path != root && parent.starts_with(root) => Ok(parent.to_path_buf()),
            _ => Err(self.fail(CommandError::Volume {
                action,
                error: VolumeError::PermissionDenied(path.display().to_string()),
            })),
        }
    }

    /// Invalidates the parent of the changed entry.
    fn finish(&self, action: CommandAction, changed: &Path) {
        log::info!("{:?}: {}", action, changed.display());
        let scope = changed.parent().unwrap_or_else(|| self.service.workspace_root());
        self.service.invalidate(Some(scope));
    }

    fn fail(&self, error: CommandError) -> CommandError {
        log::warn!("{}", error);
        self.service.view().show_message(&error.user_message());
        error
    }
}
