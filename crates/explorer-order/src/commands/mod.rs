//! Command surface of the tree: refresh, create, rename, delete, and open.

mod error;
mod explorer;
mod open_file;

pub use error::{CommandAction, CommandError};
pub use explorer::ExplorerCommands;
pub use open_file::{ClickTracker, DOUBLE_CLICK_WINDOW, OpenMode, OpenRequest};
