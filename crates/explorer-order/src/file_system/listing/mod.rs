//! Directory listing module - reading, policy resolution, sorting, and the listing service.

pub(crate) mod reading;
pub mod resolver;
mod service;
pub mod sorting;

pub(crate) use reading::read_directory;
pub use resolver::{relative_segments, resolve_policy};
pub use service::TreeListingService;
pub use sorting::{EffectivePolicy, compare_names, order_entries};
