//! Name and path checks for create and rename commands.
//!
//! Runs before anything touches the volume so a bad name never produces a partial change.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Maximum file name length in bytes (ext4, APFS and NTFS all stop at 255).
pub const MAX_NAME_BYTES: usize = 255;
/// Maximum path length in bytes.
#[cfg(target_os = "macos")]
pub const MAX_PATH_BYTES: usize = 1024;
#[cfg(not(target_os = "macos"))]
pub const MAX_PATH_BYTES: usize = 4096;

/// Why a new name was rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ValidationError {
    /// Name is empty or whitespace-only.
    Empty,
    /// Name is `.` or `..`.
    Reserved { name: String },
    /// Name contains a path separator or NUL.
    DisallowedCharacter { character: String },
    /// Name exceeds the maximum byte length for a single component.
    NameTooLong { bytes: usize, max: usize },
    /// Full path exceeds the maximum byte length.
    PathTooLong { bytes: usize, max: usize },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Name can't be empty"),
            Self::Reserved { name } => write!(f, "'{}' is not a valid name", name),
            Self::DisallowedCharacter { character } => {
                write!(f, "Name contains a disallowed character: {}", character)
            }
            Self::NameTooLong { bytes, max } => {
                write!(f, "Name is {} bytes, which exceeds the {} byte limit", bytes, max)
            }
            Self::PathTooLong { bytes, max } => {
                write!(f, "Path is {} bytes, which exceeds the {} byte limit", bytes, max)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a single name for a new file or folder.
///
/// Both separators are rejected on every platform: a name typed into the tree must stay a child
/// of the selected folder, and config paths normalize `\` to `/` anyway.
pub fn validate_filename(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::Empty);
    }

    if name == "." || name == ".." {
        return Err(ValidationError::Reserved { name: name.to_string() });
    }

    for ch in name.chars() {
        let disallowed = match ch {
            '/' => "/",
            '\\' => "\\",
            '\0' => "NUL",
            _ => continue,
        };
        return Err(ValidationError::DisallowedCharacter {
            character: disallowed.to_string(),
        });
    }

    let byte_len = name.len();
    if byte_len > MAX_NAME_BYTES {
        return Err(ValidationError::NameTooLong {
            bytes: byte_len,
            max: MAX_NAME_BYTES,
        });
    }

    Ok(())
}

/// Validates that a full path doesn't exceed the path length limit.
pub fn validate_path_length(path: &Path) -> Result<(), ValidationError> {
    let byte_len = path.as_os_str().len();
    if byte_len >= MAX_PATH_BYTES {
        return Err(ValidationError::PathTooLong {
            bytes: byte_len,
            max: MAX_PATH_BYTES,
        });
    }
    Ok(())
}

/// Validates `name` as a new child of `parent`.
pub fn validate_child(parent: &Path, name: &str) -> Result<(), ValidationError> {
    validate_filename(name)?;
    validate_path_length(&parent.join(name))
}
