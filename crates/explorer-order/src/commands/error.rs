//! Errors of tree commands, with the message shown to the user.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::ConfigError;
use crate::file_system::validation::ValidationError;
use crate::file_system::volume::VolumeError;

/// The command that failed. Used to phrase the user message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum CommandAction {
    Refresh,
    CreateFile,
    CreateFolder,
    RenameFile,
    RenameFolder,
    DeleteFile,
    DeleteFolder,
}

impl CommandAction {
    fn describe(self) -> &'static str {
        match self {
            Self::Refresh => "refresh",
            Self::CreateFile => "create file",
            Self::CreateFolder => "create folder",
            Self::RenameFile => "rename file",
            Self::RenameFolder => "rename folder",
            Self::DeleteFile => "delete file",
            Self::DeleteFolder => "delete folder",
        }
    }
}

/// Why a command failed. Nothing was changed on the volume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum CommandError {
    /// The new name was rejected before touching the volume.
    Validation { action: CommandAction, error: ValidationError },
    /// Something already exists at the target path.
    Conflict { action: CommandAction, path: PathBuf },
    /// The volume refused the operation.
    Volume { action: CommandAction, error: VolumeError },
    /// The config document couldn't be re-read.
    Config { error: ConfigError },
}

impl CommandError {
    pub fn action(&self) -> CommandAction {
        match self {
            Self::Validation { action, .. } | Self::Conflict { action, .. } | Self::Volume { action, .. } => *action,
            Self::Config { .. } => CommandAction::Refresh,
        }
    }

    /// Message for the tree view, such as `Can not rename file: Already exists: /work/a.txt`.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let action = self.action().describe();
        match self {
            Self::Validation { error, .. } => write!(f, "Can not {}: {}", action, error),
            Self::Conflict { path, .. } => write!(f, "Can not {}: '{}' already exists", action, path.display()),
            Self::Volume { error, .. } => write!(f, "Can not {}: {}", action, error),
            Self::Config { error } => write!(f, "Can not {}: {}", action, error),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<ConfigError> for CommandError {
    fn from(error: ConfigError) -> Self {
        Self::Config { error }
    }
}
