//! Startup configuration, read from the environment.
//!
//! | Variable | Default | |
//! |---|---|---|
//! | `PIZZA_CATALOG_PATH` | built-in menu | JSON catalog file, see [`Catalog`] |
//! | `PIZZA_UNKNOWN_ITEMS` | `reject` | `reject` or `free`, see [`UnknownItemPolicy`] |
//! | `PIZZA_SESSION_BUFFER` | `32` | session host channel capacity |
//!
//! A `.env` file in the working directory is loaded first when present.

use crate::model::{Catalog, CatalogError};
use crate::workflow::UnknownItemPolicy;
use std::path::PathBuf;

pub const CATALOG_PATH_VAR: &str = "PIZZA_CATALOG_PATH";
pub const UNKNOWN_ITEMS_VAR: &str = "PIZZA_UNKNOWN_ITEMS";
pub const SESSION_BUFFER_VAR: &str = "PIZZA_SESSION_BUFFER";

const DEFAULT_SESSION_BUFFER: usize = 32;

/// Configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1}")]
    InvalidValue(String, String),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Everything the system needs at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub catalog: Catalog,
    /// Where the catalog came from; `None` for the built-in menu.
    pub catalog_path: Option<PathBuf>,
    pub unknown_items: UnknownItemPolicy,
    pub session_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: Catalog::default(),
            catalog_path: None,
            unknown_items: UnknownItemPolicy::default(),
            session_buffer: DEFAULT_SESSION_BUFFER,
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let catalog_path = lookup(CATALOG_PATH_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        let catalog = match &catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::default(),
        };

        let unknown_items = match lookup(UNKNOWN_ITEMS_VAR) {
            Some(value) => value
                .parse::<UnknownItemPolicy>()
                .map_err(|e| ConfigError::InvalidValue(UNKNOWN_ITEMS_VAR.to_string(), e))?,
            None => UnknownItemPolicy::default(),
        };

        let session_buffer = match lookup(SESSION_BUFFER_VAR) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue(
                        SESSION_BUFFER_VAR.to_string(),
                        format!("'{value}' is not a positive integer"),
                    ))
                }
            },
            None => DEFAULT_SESSION_BUFFER,
        };

        Ok(Self {
            catalog,
            catalog_path,
            unknown_items,
            session_buffer,
        })
    }
}
