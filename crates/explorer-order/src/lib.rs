//! Config-driven ordering of files and folders for tree views.
//!
//! A workspace carries one `sorting-config.json` document with a global order list and a tree of
//! per-folder order lists. [`TreeListingService`] answers "list the children of this directory"
//! by resolving the folder's policy, merging it with the global one, and ordering the raw listing:
//! names pinned by policy first, in policy order, then everything else alphabetically with
//! directories before files.

// Warn on unused dependencies to catch platform-specific cfg mismatches
#![warn(unused_crate_dependencies)]
// Warn on redundant path prefixes (e.g., std::path::Path when Path is imported)
#![warn(unused_qualifications)]
// Use log::* macros instead of println!/eprintln! for proper log level control
#![deny(clippy::print_stdout, clippy::print_stderr)]

//noinspection RsUnusedImport
// notify is used through the notify_debouncer_full re-export
use notify as _;

pub mod commands;
pub mod config;
pub mod file_system;
mod ignore_poison;
pub mod tree_view;

pub use commands::{CommandError, ExplorerCommands, OpenMode, OpenRequest};
pub use config::{ConfigDocument, ConfigError, ConfigLocations, ConfigStore, OrderEntry, Policy};
pub use file_system::listing::{TreeListingService, order_entries, resolve_policy};
pub use file_system::volume::{InMemoryVolume, LocalVolume, Volume, VolumeError};
pub use file_system::watcher::ConfigWatcher;
pub use file_system::{Entry, EntryKind};
pub use tree_view::{NoopTreeView, RefreshScope, TreeView};
