//! Configuration errors.
//!
//! An absent value is never an error: lookups return `Ok(None)`. Errors are
//! reserved for sources that cannot be read and for present values that
//! cannot be converted to the requested type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {format} config file {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },

    #[error("unsupported config file format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("invalid override: {0}")]
    InvalidOverride(String),

    #[error("invalid value for {key}: cannot convert {value:?} to {target}: {reason}")]
    Conversion {
        key: String,
        value: String,
        target: &'static str,
        reason: String,
    },
}

impl ConfigError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ConfigError::Io { .. } => 60,
            ConfigError::Parse { .. } => 61,
            ConfigError::UnsupportedFormat { .. } => 62,
            ConfigError::InvalidOverride(_) => 63,
            ConfigError::Conversion { .. } => 65,
        }
    }

    /// The composite key a conversion failure refers to.
    pub fn key(&self) -> Option<&str> {
        match self {
            ConfigError::Conversion { key, .. } => Some(key),
            _ => None,
        }
    }

    /// Whether this error came from coercing a present value.
    pub fn is_conversion(&self) -> bool {
        matches!(self, ConfigError::Conversion { .. })
    }
}
