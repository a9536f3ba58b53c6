use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{FolioError, Result};

/// Default name of the reference store file, as written by the build
/// pipeline.
pub const DEFAULT_DATABASE: &str = "stacks.sqlite";

/// Default address the server binds to.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

/// Configuration for the Folio server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolioConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Path to the reference store SQLite file.
    pub database: String,
    /// Address and port the HTTP server binds to.
    pub bind_addr: String,
    /// Title shown in page headers.
    pub site_title: String,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            version: 1,
            database: DEFAULT_DATABASE.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            site_title: "Folio".to_string(),
        }
    }
}

/// Loads the configuration from disk.
///
/// If the file does not exist, returns the default configuration.
pub fn load_config(config_path: &Path) -> Result<FolioConfig> {
    if !config_path.exists() {
        return Ok(FolioConfig::default());
    }

    let contents = fs::read_to_string(config_path).map_err(|e| FolioError::Config {
        message: format!(
            "failed to read config file '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    let config: FolioConfig = serde_json::from_str(&contents).map_err(|e| FolioError::Config {
        message: format!(
            "failed to parse config file '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    Ok(config)
}
