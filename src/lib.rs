pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{local::LocalDataSource, toml_config::AtlasConfig};
pub use crate::core::{
    atlas::{AtlasEngine, Query},
    store::DatasetStore,
};
pub use utils::error::{AtlasError, Result};
