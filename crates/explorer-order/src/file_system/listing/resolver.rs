//! Finds the folder policy that applies to a directory.
//!
//! The folder policy is a tree keyed by directory names. A directory gets a local policy only if
//! every segment of its path (relative to the workspace root) is a `Nested` entry of the level
//! above. One missing link and the directory has no local policy at all; only the global policy
//! applies to its children.

use std::path::Path;

use crate::config::Policy;

/// Path segments of `target_dir` relative to `workspace_root`, with `\` treated as `/`.
///
/// Returns None if `target_dir` is not inside the workspace. Empty and `.` segments are skipped,
/// so the workspace root itself has no segments.
pub fn relative_segments(workspace_root: &Path, target_dir: &Path) -> Option<Vec<String>> {
    let root = normalize(workspace_root);
    let root = root.trim_end_matches('/');
    let target = normalize(target_dir);

    let rest = if target.trim_end_matches('/') == root {
        ""
    } else {
        target.strip_prefix(root)?.strip_prefix('/')?
    };

    Some(
        rest.split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .map(str::to_string)
            .collect(),
    )
}

fn normalize(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Walks `root_policy` down the relative path of `target_dir`.
///
/// `target_dir == workspace_root` resolves to `root_policy` itself.
pub fn resolve_policy<'a>(root_policy: &'a Policy, workspace_root: &Path, target_dir: &Path) -> Option<&'a Policy> {
    let Some(segments) = relative_segments(workspace_root, target_dir) else {
        log::debug!(
            "resolve_policy: {} is outside the workspace {}",
            target_dir.display(),
            workspace_root.display()
        );
        return None;
    };

    let mut current = root_policy;
    for segment in &segments {
        match current.child(segment) {
            Some(child) => current = child,
            None => {
                log::debug!(
                    "resolve_policy: no folder policy for '{}' in {}",
                    segment,
                    target_dir.display()
                );
                return None;
            }
        }
    }
    Some(current)
}
