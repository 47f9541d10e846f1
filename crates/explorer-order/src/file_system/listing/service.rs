//! Answers "list the children of this directory" for the tree view.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::{ConfigError, ConfigStore, Policy};
use crate::file_system::Entry;
use crate::file_system::listing::resolver::resolve_policy;
use crate::file_system::listing::sorting::order_entries;
use crate::file_system::volume::{Volume, VolumeError};
use crate::tree_view::{NoopTreeView, RefreshScope, TreeView};

/// Ties the config store, the policy resolver and the sorter to a volume and a view.
///
/// Every `list()` reads the directory fresh and orders it against the config snapshot current at
/// that moment; nothing about a listing is cached between calls.
pub struct TreeListingService {
    volume: Arc<dyn Volume>,
    config: ConfigStore,
    view: Arc<dyn TreeView>,
}

impl TreeListingService {
    pub fn new(volume: Arc<dyn Volume>, config: ConfigStore) -> Self {
        Self {
            volume,
            config,
            view: Arc::new(NoopTreeView),
        }
    }

    pub fn with_view(mut self, view: Arc<dyn TreeView>) -> Self {
        self.view = view;
        self
    }

    pub fn workspace_root(&self) -> &Path {
        self.config.workspace_root()
    }

    pub fn config(&self) -> &ConfigStore {
        &self.config
    }

    pub fn volume(&self) -> &Arc<dyn Volume> {
        &self.volume
    }

    pub fn view(&self) -> &Arc<dyn TreeView> {
        &self.view
    }

    /// Relative paths are taken from the workspace root.
    pub fn absolute(&self, dir: &Path) -> PathBuf {
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            self.workspace_root().join(dir)
        }
    }

    /// Lists a directory's children in policy order.
    pub fn list(&self, dir: &Path) -> Result<Vec<Entry>, VolumeError> {
        let start = std::time::Instant::now();
        let dir = self.absolute(dir);

        let entries = self.volume.list_directory(&dir)?;
        let document = self.config.snapshot();
        let local = document
            .folders()
            .and_then(|root_policy| resolve_policy(root_policy, self.workspace_root(), &dir));
        let ordered = order_entries(entries, local, document.global());

        log::debug!(
            "list: path={}, entries={}, local_policy={}, total={}ms",
            dir.display(),
            ordered.len(),
            local.is_some(),
            start.elapsed().as_millis()
        );
        Ok(ordered)
    }

    /// Lists the workspace root.
    pub fn list_root(&self) -> Result<Vec<Entry>, VolumeError> {
        let root = self.workspace_root().to_path_buf();
        self.list(&root)
    }

    /// The folder policy that applies to `dir`, if any.
    pub fn policy_for(&self, dir: &Path) -> Option<Policy> {
        let dir = self.absolute(dir);
        let document = self.config.snapshot();
        document
            .folders()
            .and_then(|root_policy| resolve_policy(root_policy, self.workspace_root(), &dir))
            .cloned()
    }

    /// Re-reads the config and tells the view what to re-fetch.
    ///
    /// On a config error nothing is invalidated and the previous document stays in effect.
    pub fn refresh(&self, scope: Option<&Path>) -> Result<(), ConfigError> {
        self.config.refresh()?;
        log::info!(
            "Sorting config reloaded from {}",
            self.config
                .source()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "defaults".to_string())
        );
        self.invalidate(scope);
        Ok(())
    }

    /// Tells the view what to re-fetch, without touching the config.
    pub fn invalidate(&self, scope: Option<&Path>) {
        let scope = RefreshScope::from_hint(scope.map(|p| self.absolute(p)));
        log::debug!("invalidate: {:?}", scope);
        self.view.invalidate(&scope);
    }
}
