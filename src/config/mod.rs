//! Configuration module for Den-Harvest
//!
//! Handles loading, parsing, and validating harvester configuration. The
//! binary runs on compiled-in defaults; a TOML file can override them.

mod parser;
mod types;
mod validation;

pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use types::{
    CatalogConfig, Config, HarvesterConfig, OutputConfig, SearchQuery, UserAgentConfig,
};
pub use validation::validate;
