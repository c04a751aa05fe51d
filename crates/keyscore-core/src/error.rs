//! Configuration error types.
//!
//! Every way a scoring configuration can be rejected is reported here, at the
//! moment the configuration is built. Scoring itself never fails, so the
//! engine has no error type of its own.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a [`ScoringConfig`](crate::model::ScoringConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config content is not valid TOML/JSON or has the wrong shape.
    #[error("failed to parse {format} config: {message}")]
    Parse {
        format: ConfigFormat,
        message: String,
    },

    /// The keyword groups list is absent or null.
    #[error("config has no keyword_groups list")]
    MissingGroups,

    /// A keyword group has no point value. `group` is the 0-based index;
    /// the message numbers groups from 1.
    #[error("keyword group {} has no points value", .group + 1)]
    MissingPoints { group: usize },

    /// The file extension does not name a supported format.
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// On-disk formats a scoring config can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// Pick a format from a file extension (`toml` or `json`).
    pub fn from_extension(ext: &str) -> Result<Self, ConfigError> {
        match ext.to_lowercase().as_str() {
            "toml" => Ok(ConfigFormat::Toml),
            "json" => Ok(ConfigFormat::Json),
            other => Err(ConfigError::UnsupportedFormat(other.to_string())),
        }
    }
}

impl std::fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigFormat::Toml => write!(f, "TOML"),
            ConfigFormat::Json => write!(f, "JSON"),
        }
    }
}
