//! Sorting config: policy model, document locations, and the cached store.

mod locations;
mod policy;
mod store;

pub use locations::{CONFIG_FILE_NAME, CONFIG_PATH_ENV, ConfigLocations, FALLBACK_DIR};
pub use policy::{ConfigDocument, LEGACY_SORT_KEY, OrderEntry, Policy, SORT_FOLDERS_KEY, SORT_GLOBAL_KEY};
pub use store::{ConfigError, ConfigStore, LoadedConfig, load};

#[cfg(test)]
mod policy_test;
