//! Open-file requests and the double-click heuristic.
//!
//! The first click on a file opens it as a preview that the next click on another file replaces.
//! Clicking the same file again within [`DOUBLE_CLICK_WINDOW`] opens it pinned.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Two opens of the same path closer than this count as a double click.
pub const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum OpenMode {
    /// Replaced by the next preview.
    Preview,
    /// Stays open.
    Pinned,
}

/// What the host editor should open, and how.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OpenRequest {
    pub path: PathBuf,
    pub mode: OpenMode,
}

/// Remembers the last opened path to detect double clicks.
#[derive(Debug, Default)]
pub struct ClickTracker {
    last: Option<(PathBuf, Instant)>,
}

impl ClickTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an open of `path` at `now` and returns the mode to open it in.
    pub fn register(&mut self, path: &Path, now: Instant) -> OpenMode {
        let double_click = self
            .last
            .as_ref()
            .is_some_and(|(last_path, at)| last_path == path && now.saturating_duration_since(*at) < DOUBLE_CLICK_WINDOW);
        self.last = Some((path.to_path_buf(), now));

        if double_click { OpenMode::Pinned } else { OpenMode::Preview }
    }
}
