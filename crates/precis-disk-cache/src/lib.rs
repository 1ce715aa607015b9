//! # precis-disk-cache
//!
//! Resolves where pretrained models and lexical databases live on disk,
//! and downloads them there on first use.
#![warn(missing_docs)]

use crate::path_resolver::PathResolver;

pub mod disk_cache;
pub mod path_resolver;
pub mod path_utils;

pub use disk_cache::{PrecisDiskCache, PrecisDiskCacheOptions};

/// Environment variable key to override the default cache directory.
pub const PRECIS_CACHE_DIR: &str = "PRECIS_CACHE_DIR";
/// Environment variable key to override the default data directory.
pub const PRECIS_DATA_DIR: &str = "PRECIS_DATA_DIR";

/// Default [`PathResolver`] for precis.
pub const PRECIS_CACHE_CONFIG: PathResolver = PathResolver {
    qualifier: "io.crates.precis",
    organization: "",
    application: "precis",
    cache_env_vars: &[PRECIS_CACHE_DIR],
    data_env_vars: &[PRECIS_DATA_DIR],
};
