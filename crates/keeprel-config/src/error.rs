//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating or reading `keeprel.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No `keeprel.toml` at the path, or in any parent of the start directory.
    #[error("no keeprel.toml found at {0}")]
    NotFound(PathBuf),

    /// The file is not valid TOML or does not match the schema.
    #[error("cannot parse {path}: {source}")]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A setting parsed but has an unusable value.
    #[error("invalid setting: {0}")]
    Invalid(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
