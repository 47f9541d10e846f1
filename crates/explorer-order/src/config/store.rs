//! Loading and caching of the sorting config document.
//!
//! The store holds one immutable document behind an `Arc`. `refresh()` re-reads from disk and
//! swaps the `Arc` under a write lock, so a reader holding a snapshot keeps a consistent document
//! even while a refresh runs.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::locations::ConfigLocations;
use super::policy::ConfigDocument;
use crate::ignore_poison::IgnorePoisonRw;

/// Errors while reading the config document. A missing document is not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ConfigError {
    /// The document exists but isn't valid JSON.
    Parse { path: PathBuf, message: String },
    /// The document exists but couldn't be read (permissions, it's a directory, etc.).
    Io { path: PathBuf, message: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { path, message } => {
                write!(f, "Invalid sorting config {}: {}", path.display(), message)
            }
            Self::Io { path, message } => {
                write!(f, "Can't read sorting config {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// A document together with the file it came from.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub document: ConfigDocument,
    /// `None` when no candidate file existed.
    pub source: Option<PathBuf>,
}

/// Reads the first existing candidate. No candidate at all yields the empty document.
pub fn load(locations: &ConfigLocations) -> Result<LoadedConfig, ConfigError> {
    for candidate in locations.candidates() {
        let text = match fs::read_to_string(candidate) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(ConfigError::Io {
                    path: candidate.clone(),
                    message: e.to_string(),
                });
            }
        };

        let document = ConfigDocument::from_json(&text).map_err(|e| ConfigError::Parse {
            path: candidate.clone(),
            message: e.to_string(),
        })?;
        log::debug!("Loaded sorting config from {}", candidate.display());
        return Ok(LoadedConfig {
            document,
            source: Some(candidate.clone()),
        });
    }

    log::debug!("No sorting config found, using alphabetical order");
    Ok(LoadedConfig::default())
}

struct Current {
    document: Arc<ConfigDocument>,
    source: Option<PathBuf>,
}

impl From<LoadedConfig> for Current {
    fn from(loaded: LoadedConfig) -> Self {
        Self {
            document: Arc::new(loaded.document),
            source: loaded.source,
        }
    }
}

/// Owns the workspace's current config document.
pub struct ConfigStore {
    workspace_root: PathBuf,
    locations: ConfigLocations,
    current: RwLock<Current>,
}

impl ConfigStore {
    /// Loads the config for a workspace, failing on a malformed document.
    pub fn open(workspace_root: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let workspace_root = workspace_root.into();
        let locations = ConfigLocations::for_workspace(&workspace_root);
        Self::with_locations(workspace_root, locations)
    }

    /// Loads from explicit locations, failing on a malformed document.
    pub fn with_locations(workspace_root: impl Into<PathBuf>, locations: ConfigLocations) -> Result<Self, ConfigError> {
        let loaded = load(&locations)?;
        Ok(Self {
            workspace_root: workspace_root.into(),
            locations,
            current: RwLock::new(loaded.into()),
        })
    }

    /// Like `open`, but a broken document is logged once and the store starts empty.
    pub fn open_or_empty(workspace_root: impl Into<PathBuf>) -> Self {
        let workspace_root = workspace_root.into();
        let locations = ConfigLocations::for_workspace(&workspace_root);
        Self::with_locations_or_empty(workspace_root, locations)
    }

    /// Like `with_locations`, but a broken document is logged once and the store starts empty.
    pub fn with_locations_or_empty(workspace_root: impl Into<PathBuf>, locations: ConfigLocations) -> Self {
        let loaded = load(&locations).unwrap_or_else(|e| {
            log::warn!("{}; falling back to alphabetical order", e);
            LoadedConfig::default()
        });
        Self {
            workspace_root: workspace_root.into(),
            locations,
            current: RwLock::new(loaded.into()),
        }
    }

    /// A store seeded with an in-memory document. `refresh()` still reads the default locations.
    pub fn from_document(workspace_root: impl Into<PathBuf>, document: ConfigDocument) -> Self {
        let workspace_root = workspace_root.into();
        let locations = ConfigLocations::defaults(&workspace_root);
        Self {
            workspace_root,
            locations,
            current: RwLock::new(Current {
                document: Arc::new(document),
                source: None,
            }),
        }
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn locations(&self) -> &ConfigLocations {
        &self.locations
    }

    /// The current document. Cheap; later refreshes don't affect the returned handle.
    pub fn snapshot(&self) -> Arc<ConfigDocument> {
        Arc::clone(&self.current.read_ignore_poison().document)
    }

    /// The file the current document was read from.
    pub fn source(&self) -> Option<PathBuf> {
        self.current.read_ignore_poison().source.clone()
    }

    /// Re-reads the document from disk. On error the previous document stays in place.
    pub fn refresh(&self) -> Result<(), ConfigError> {
        let loaded = load(&self.locations)?;
        *self.current.write_ignore_poison() = loaded.into();
        Ok(())
    }
}
