//! Where the sorting config document is looked up.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// File name of the sorting config document.
pub const CONFIG_FILE_NAME: &str = "sorting-config.json";
/// Directory (relative to the workspace root) holding the fallback document.
pub const FALLBACK_DIR: &str = ".vscode";
/// Environment variable naming an explicit config document path.
pub const CONFIG_PATH_ENV: &str = "EXPLORER_ORDER_CONFIG";

/// Ordered list of candidate document paths. The first one that exists wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigLocations {
    candidates: Vec<PathBuf>,
}

impl ConfigLocations {
    /// Locations for a workspace.
    /// Priority: `EXPLORER_ORDER_CONFIG` env var > `<root>/sorting-config.json` > `<root>/.vscode/sorting-config.json`.
    pub fn for_workspace(workspace_root: &Path) -> Self {
        Self::with_env_lookup(workspace_root, |key| env::var_os(key))
    }

    /// Like `for_workspace`, reading variables through `lookup`. An empty value counts as unset.
    pub fn with_env_lookup(workspace_root: &Path, lookup: impl FnOnce(&str) -> Option<OsString>) -> Self {
        let from_env = lookup(CONFIG_PATH_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::from_override_and_defaults(workspace_root, from_env)
    }

    /// Primary and fallback locations, ignoring the environment.
    pub fn defaults(workspace_root: &Path) -> Self {
        Self {
            candidates: vec![
                workspace_root.join(CONFIG_FILE_NAME),
                workspace_root.join(FALLBACK_DIR).join(CONFIG_FILE_NAME),
            ],
        }
    }

    /// An override replaces the default search entirely. Relative overrides are taken from the workspace root.
    pub fn from_override_and_defaults(workspace_root: &Path, override_path: Option<PathBuf>) -> Self {
        match override_path {
            Some(path) if path.is_absolute() => Self { candidates: vec![path] },
            Some(path) => Self {
                candidates: vec![workspace_root.join(path)],
            },
            None => Self::defaults(workspace_root),
        }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// Whether `path` is one of the candidate documents.
    pub fn contains(&self, path: &Path) -> bool {
        self.candidates.iter().any(|candidate| candidate == path)
    }
}
