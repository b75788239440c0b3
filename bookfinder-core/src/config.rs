//! Configuration shared by the CLI and server
//!
//! All values come from environment variables with defaults matching the
//! public Google Books service.

use crate::catalog::DEFAULT_CATALOG_URL;
use crate::error::ConfigError;
use crate::search::{SearchPolicy, DEFAULT_MAX_OFFSET, DEFAULT_PAGE_SIZE};
use std::path::PathBuf;

pub const CATALOG_URL_VAR: &str = "BOOKFINDER_CATALOG_URL";
pub const DATA_PATH_VAR: &str = "BOOKFINDER_DATA_PATH";
pub const PAGE_SIZE_VAR: &str = "BOOKFINDER_PAGE_SIZE";
pub const MAX_OFFSET_VAR: &str = "BOOKFINDER_MAX_OFFSET";

pub const DEFAULT_DATA_PATH: &str = "./bookfinder_data";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Base URL of the catalog's `volumes` API
    pub catalog_url: String,
    /// Directory holding persisted favorites and the last search
    pub data_path: PathBuf,
    /// Page size and upstream offset ceiling
    pub policy: SearchPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            policy: SearchPolicy::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through `lookup`; unset variables take their defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog_url = match lookup(CATALOG_URL_VAR) {
            Some(url) if url.trim().is_empty() => {
                return Err(ConfigError::Empty {
                    name: CATALOG_URL_VAR,
                })
            }
            Some(url) => url.trim().to_string(),
            None => DEFAULT_CATALOG_URL.to_string(),
        };

        let data_path = lookup(DATA_PATH_VAR)
            .unwrap_or_else(|| DEFAULT_DATA_PATH.to_string())
            .into();

        let page_size = positive(&lookup, PAGE_SIZE_VAR, DEFAULT_PAGE_SIZE)?;
        let max_offset = positive(&lookup, MAX_OFFSET_VAR, DEFAULT_MAX_OFFSET)?;

        Ok(Self {
            catalog_url,
            data_path,
            policy: SearchPolicy::new(page_size, max_offset),
        })
    }
}

fn positive(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: u32,
) -> Result<u32, ConfigError> {
    match lookup(name) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidNumber { name, value }),
        },
    }
}
