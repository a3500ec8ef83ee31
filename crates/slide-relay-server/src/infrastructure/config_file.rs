//! Optional TOML configuration file for the relay.
//!
//! Every field is optional.  A value given on the command line (or through
//! its environment variable) wins over the file, and the file wins over the
//! built-in default.
//!
//! ```toml
//! [server]
//! bind_address = "127.0.0.1"
//! port = 5000
//! shutdown_grace_secs = 5
//! ```

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level layout of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub server: ServerSection,
}

/// The `[server]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    /// IP address to listen on.
    #[serde(default)]
    pub bind_address: Option<IpAddr>,
    /// TCP port to listen on.
    #[serde(default)]
    pub port: Option<u16>,
    /// Seconds shutdown waits for open sessions.
    #[serde(default)]
    pub shutdown_grace_secs: Option<u64>,
}

impl FileConfig {
    /// Reads and parses the config file at `path`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Io`] if the file cannot be read.
    /// - [`ConfigError::Parse`] if the contents are not valid config TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses config TOML from a string.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
