//! User configuration, read from a JSON file.

use std::path::{Path, PathBuf};

use httpsh_repl::DEFAULT_HISTORY_LIMIT;
use httpsh_util::config_file_path;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Environment variable overriding the configuration file location.
pub const CONFIG_PATH_ENV: &str = "HTTPSH_CONFIG_PATH";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Number of lines kept for Up/Down recall.
    pub history_limit: usize,
    /// Locations probed, relative to the base address, by `set base`.
    pub metadata_search_paths: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            metadata_search_paths: [
                "swagger.json",
                "swagger/v1/swagger.json",
                "openapi.json",
                "/swagger.json",
                "/swagger/v1/swagger.json",
                "/openapi.json",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
            request_timeout_secs: 30,
        }
    }
}

impl ShellConfig {
    /// Loads the configuration from the default location.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is
    /// logged and also yields the defaults.
    pub fn load() -> Self {
        let path = default_config_path();
        match Self::load_from_path(&path) {
            Ok(config) => config,
            Err(error) => {
                warn!(path = %path.display(), error = %error, "ignoring invalid configuration");
                Self::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Get the default path for the configuration file.
pub fn default_config_path() -> PathBuf {
    config_file_path(CONFIG_PATH_ENV, CONFIG_FILE_NAME)
}
