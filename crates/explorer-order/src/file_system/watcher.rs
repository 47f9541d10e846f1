//! Config file watcher with debouncing.
//!
//! Watches the directories that may hold the sorting config and re-reads the config when one of
//! the candidate files changes. Other changes in those directories are ignored.

use notify_debouncer_full::{
    DebounceEventResult, Debouncer, RecommendedCache, new_debouncer,
    notify::{RecommendedWatcher, RecursiveMode},
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::ConfigLocations;
use crate::file_system::listing::TreeListingService;

/// Default debounce duration in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;

/// Keeps a debounced watcher alive. Dropping it stops watching.
pub struct ConfigWatcher {
    #[allow(dead_code, reason = "Debouncer must be held to keep watching")]
    debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
    watched: Vec<PathBuf>,
}

impl ConfigWatcher {
    /// Starts watching the config locations. `on_change` runs on the debouncer's thread.
    pub fn start<F>(locations: ConfigLocations, debounce: Duration, mut on_change: F) -> Result<Self, String>
    where
        F: FnMut() + Send + 'static,
    {
        let watched = watch_dirs(&locations);
        if watched.is_empty() {
            return Err("No existing directory to watch for the sorting config".to_string());
        }

        let filter = locations;
        let mut debouncer = new_debouncer(debounce, None, move |result: DebounceEventResult| match result {
            Ok(events) => {
                if events.iter().any(|event| touches_config(&filter, &event.paths)) {
                    log::debug!("Watcher: sorting config changed");
                    on_change();
                }
            }
            Err(errors) => {
                for error in errors {
                    log::warn!("Watcher: {}", error);
                }
            }
        })
        .map_err(|e| format!("Failed to create watcher: {}", e))?;

        for dir in &watched {
            debouncer
                .watch(dir, RecursiveMode::NonRecursive)
                .map_err(|e| format!("Failed to watch {}: {}", dir.display(), e))?;
            log::debug!("Watcher: watching {}", dir.display());
        }

        Ok(Self { debouncer, watched })
    }

    /// Watches the service's config and refreshes the whole tree on every change.
    ///
    /// A broken document is reported through the view and the previous one stays in effect.
    /// Volumes that don't live on disk can't be watched.
    pub fn for_service(service: Arc<TreeListingService>, debounce: Duration) -> Result<Self, String> {
        let volume = service.volume();
        if !volume.supports_watching() {
            return Err(format!("Volume '{}' doesn't support watching", volume.name()));
        }
        let locations = service.config().locations().clone();
        Self::start(locations, debounce, move || {
            if let Err(e) = service.refresh(None) {
                log::warn!("Watcher: {}", e);
                service.view().show_message(&e.to_string());
            }
        })
    }

    /// Directories being watched.
    pub fn watched_dirs(&self) -> &[PathBuf] {
        &self.watched
    }
}

/// The existing parent directories of the config candidates, without duplicates.
///
/// A candidate whose directory doesn't exist yet (no `.vscode` folder, say) can't be watched.
pub fn watch_dirs(locations: &ConfigLocations) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = Vec::new();
    for candidate in locations.candidates() {
        let Some(parent) = candidate.parent() else {
            continue;
        };
        if !parent.is_dir() {
            log::debug!("Watcher: skipping missing directory {}", parent.display());
            continue;
        }
        if !dirs.iter().any(|d| d == parent) {
            dirs.push(parent.to_path_buf());
        }
    }
    dirs
}

/// Whether any of an event's paths is a config candidate.
pub fn touches_config(locations: &ConfigLocations, paths: &[PathBuf]) -> bool {
    paths.iter().any(|path| locations.contains(path))
}

/// Debounce used when the caller doesn't pick one.
pub fn default_debounce() -> Duration {
    Duration::from_millis(DEFAULT_DEBOUNCE_MS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CONFIG_FILE_NAME, ConfigDocument, ConfigStore, FALLBACK_DIR};
    use crate::file_system::volume::{InMemoryVolume, LocalVolume};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn locations(root: &Path) -> ConfigLocations {
        ConfigLocations::defaults(root)
    }

    #[test]
    fn test_touches_config_matches_primary_and_fallback() {
        let root = Path::new("/work");
        let locations = locations(root);

        assert!(touches_config(&locations, &[root.join(CONFIG_FILE_NAME)]));
        assert!(touches_config(
            &locations,
            &[root.join("other.txt"), root.join(FALLBACK_DIR).join(CONFIG_FILE_NAME)]
        ));
    }

    #[test]
    fn test_touches_config_ignores_unrelated_paths() {
        let root = Path::new("/work");
        let locations = locations(root);

        assert!(!touches_config(&locations, &[]));
        assert!(!touches_config(&locations, &[root.join("src").join(CONFIG_FILE_NAME)]));
        assert!(!touches_config(&locations, &[root.join("README.md")]));
    }

    #[test]
    fn test_watch_dirs_skips_missing_fallback_dir() {
        let temp = TempDir::new().unwrap();

        let dirs = watch_dirs(&locations(temp.path()));

        assert_eq!(dirs, vec![temp.path().to_path_buf()]);
    }

    #[test]
    fn test_watch_dirs_includes_existing_fallback_dir() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(FALLBACK_DIR)).unwrap();

        let dirs = watch_dirs(&locations(temp.path()));

        assert_eq!(dirs, vec![temp.path().to_path_buf(), temp.path().join(FALLBACK_DIR)]);
    }

    #[test]
    fn test_watch_dirs_follows_override() {
        let temp = TempDir::new().unwrap();
        let override_path = temp.path().join("custom.json");
        let locations = ConfigLocations::from_override_and_defaults(temp.path(), Some(override_path));

        let dirs = watch_dirs(&locations);

        assert_eq!(dirs, vec![temp.path().to_path_buf()]);
    }

    #[test]
    fn test_start_fails_without_any_existing_directory() {
        let locations = locations(Path::new("/definitely/not/a/workspace"));

        let result = ConfigWatcher::start(locations, default_debounce(), || {});

        assert!(result.is_err());
    }

    #[test]
    fn test_for_service_refuses_volume_without_watching() {
        let temp = TempDir::new().unwrap();
        let service = TreeListingService::new(
            Arc::new(InMemoryVolume::new("scratch", temp.path())),
            ConfigStore::from_document(temp.path(), ConfigDocument::default()),
        );

        let result = ConfigWatcher::for_service(Arc::new(service), default_debounce());

        assert_eq!(result.err(), Some("Volume 'scratch' doesn't support watching".to_string()));
    }

    #[test]
    fn test_for_service_watches_local_volume() {
        let temp = TempDir::new().unwrap();
        let service = TreeListingService::new(
            Arc::new(LocalVolume::new(temp.path())),
            ConfigStore::from_document(temp.path(), ConfigDocument::default()),
        );

        let watcher = ConfigWatcher::for_service(Arc::new(service), default_debounce()).unwrap();

        assert_eq!(watcher.watched_dirs(), &[temp.path().to_path_buf()]);
    }

    #[test]
    fn test_start_watches_workspace_root() {
        let temp = TempDir::new().unwrap();

        let watcher = ConfigWatcher::start(locations(temp.path()), default_debounce(), || {}).unwrap();

        assert_eq!(watcher.watched_dirs(), &[temp.path().to_path_buf()]);
    }
}
