use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading tuning configuration.
///
/// Gameplay itself never fails: illegal moves are rejected silently by
/// each engine and leave its state untouched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
