//! File system module - entries, listing, volumes, validation, and the config watcher.

mod entry;
pub mod listing;
pub mod validation;
pub mod volume;
pub mod watcher;

pub use entry::{Entry, EntryKind};
