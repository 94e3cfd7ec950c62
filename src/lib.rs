//! Den-Harvest: a ScoutShop award-image harvester
//!
//! This crate crawls the ScoutShop catalog search for Cub Scout advancement
//! awards (adventure loops, adventure pins, rank emblem patches), classifies
//! each product by award type and den, downloads the product image into a
//! folder taxonomy, and records everything in a CSV manifest.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod layout;
pub mod manifest;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Den-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to fetch {url} after {attempts} attempts: {source}")]
    Fetch {
        url: String,
        attempts: u32,
        source: reqwest::Error,
    },

    #[error("Failed to download image {url}: {source}")]
    Download { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Manifest error: {0}")]
    Manifest(#[from] csv::Error),

    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Den-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use classify::{classify_den, classify_type, Den, ProductType};
pub use config::Config;
pub use crawler::{run_harvest, RunSummary};
