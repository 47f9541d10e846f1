//! Turns path arguments into the absolute paths the listing service expects.

use std::fs;
use std::path::{Path, PathBuf};

/// Directory argument of `list` and `tree`.
///
/// Relative paths are taken from the (canonical) workspace root. Absolute paths are canonicalized
/// so a symlinked prefix still lands inside the root and keeps its folder policy.
pub fn resolve_dir(root: &Path, dir: Option<&Path>) -> Result<PathBuf, String> {
    match dir {
        None => Ok(root.to_path_buf()),
        Some(dir) if dir.is_absolute() => {
            fs::canonicalize(dir).map_err(|e| format!("Can't open directory {}: {e}", dir.display()))
        }
        Some(dir) => Ok(root.join(dir)),
    }
}

/// `--config` argument. Relative paths are taken from the current directory, like any other
/// command-line path.
pub fn resolve_config(cwd: &Path, config: PathBuf) -> PathBuf {
    if config.is_absolute() { config } else { cwd.join(config) }
}
