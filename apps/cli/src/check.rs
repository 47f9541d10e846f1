//! Config diagnostics: names in the folder policy that match nothing on disk.

use explorer_order::{Policy, Volume};
use std::path::{Path, PathBuf};

/// Paths named by the folder policy that don't exist.
///
/// Nested policies are followed only into directories that exist; a missing directory is
/// reported once, not together with everything below it.
pub fn find_missing(volume: &dyn Volume, dir: &Path, policy: &Policy) -> Vec<PathBuf> {
    let mut missing = Vec::new();
    collect_missing(volume, dir, policy, &mut missing);
    missing
}

fn collect_missing(volume: &dyn Volume, dir: &Path, policy: &Policy, missing: &mut Vec<PathBuf>) {
    for entry in policy.entries() {
        let path = dir.join(entry.name());
        if !volume.exists(&path) {
            missing.push(path);
            continue;
        }
        if let Some(child) = entry.policy() {
            match volume.is_directory(&path) {
                Ok(true) => collect_missing(volume, &path, child, missing),
                Ok(false) => log::warn!("{} has a nested order but is not a directory", path.display()),
                Err(e) => log::warn!("Can't check {}: {}", path.display(), e),
            }
        }
    }
}
