//! Low-level directory reading and Entry construction.
//!
//! Pure I/O: reads from disk and returns entries in read order. Ordering happens in sorting.rs.

use std::fs;
use std::path::Path;

use crate::file_system::{Entry, EntryKind};

/// Lists the direct children of a directory.
///
/// Entries that can't be stat'ed (permission denied, broken symlink) are still listed, as files,
/// so a half-readable directory doesn't hide names the user can see in a shell.
pub fn read_directory(path: &Path) -> Result<Vec<Entry>, std::io::Error> {
    let start = std::time::Instant::now();
    let mut entries = Vec::new();

    for dir_entry in fs::read_dir(path)? {
        let dir_entry = dir_entry?;
        let kind = entry_kind(&dir_entry).unwrap_or(EntryKind::File);
        entries.push(Entry::new(
            dir_entry.file_name().to_string_lossy().to_string(),
            kind,
            dir_entry.path(),
        ));
    }

    log::debug!(
        "read_directory: path={}, entries={}, total={}ms",
        path.display(),
        entries.len(),
        start.elapsed().as_millis()
    );

    Ok(entries)
}

/// Kind of a directory entry, following symlinks. None if it can't be determined.
fn entry_kind(entry: &fs::DirEntry) -> Option<EntryKind> {
    let file_type = entry.file_type().ok()?;
    let is_dir = if file_type.is_symlink() {
        fs::metadata(entry.path()).ok()?.is_dir()
    } else {
        file_type.is_dir()
    };
    Some(if is_dir { EntryKind::Directory } else { EntryKind::File })
}
