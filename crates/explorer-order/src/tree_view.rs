//! The rendering side: whatever draws the tree implements `TreeView`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Which part of the tree must be re-fetched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", tag = "scope", content = "path")]
pub enum RefreshScope {
    WholeTree,
    /// Children of this directory (and below).
    Subtree(PathBuf),
}

impl RefreshScope {
    pub fn from_hint(scope: Option<PathBuf>) -> Self {
        match scope {
            Some(path) => Self::Subtree(path),
            None => Self::WholeTree,
        }
    }
}

/// Receives invalidation signals and user-visible messages.
pub trait TreeView: Send + Sync {
    /// Listings in `scope` are stale and must be requested again.
    fn invalidate(&self, scope: &RefreshScope);

    /// Shows a message to the user, such as a failed rename.
    fn show_message(&self, message: &str) {
        log::warn!("{}", message);
    }
}

/// A view that ignores invalidation, for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTreeView;

impl TreeView for NoopTreeView {
    fn invalidate(&self, _scope: &RefreshScope) {}
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{RefreshScope, TreeView};
    use crate::ignore_poison::IgnorePoison;
    use std::sync::Mutex;

    /// Records everything it receives.
    #[derive(Default)]
    pub(crate) struct RecordingTreeView {
        invalidations: Mutex<Vec<RefreshScope>>,
        messages: Mutex<Vec<String>>,
    }

    impl RecordingTreeView {
        pub(crate) fn invalidations(&self) -> Vec<RefreshScope> {
            self.invalidations.lock_ignore_poison().clone()
        }

        pub(crate) fn messages(&self) -> Vec<String> {
            self.messages.lock_ignore_poison().clone()
        }
    }

    impl TreeView for RecordingTreeView {
        fn invalidate(&self, scope: &RefreshScope) {
            self.invalidations.lock_ignore_poison().push(scope.clone());
        }

        fn show_message(&self, message: &str) {
            self.messages.lock_ignore_poison().push(message.to_string());
        }
    }
}
