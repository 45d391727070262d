//! Error types for the rcc CLI.
//!
//! Every error carries:
//! - A stable code for machine parsing
//! - A category for grouping
//! - A headline and a remediation hint for humans
//! - An exit code
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Invalid Configuration Value
//!   Reason: invalid value for quarkus.rest-client.api.connect-timeout: ...
//!   Fix: Correct the value at the reported key, or remove it to fall back
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::exit_codes::ExitCode;
use rcc_config::ConfigError;

/// Result type alias for rcc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Config files and overrides.
    Config,
    /// Present values that do not convert.
    Conversion,
    /// Command line usage.
    Usage,
    /// Rendering and I/O.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Config => write!(f, "config"),
            ErrorCategory::Conversion => write!(f, "conversion"),
            ErrorCategory::Usage => write!(f, "usage"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for the CLI.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("unknown field '{name}'; expected one of: {expected}")]
    UnknownField { name: String, expected: String },

    #[error("no client identity given; pass --key or --type")]
    MissingIdentity,

    #[error("failed to render {format} output: {message}")]
    Render { format: &'static str, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Stable error code.
    ///
    /// Configuration errors keep the codes of [`ConfigError`] (60-69);
    /// CLI errors use 10-19 for usage and 70-79 for output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(inner) => inner.code(),
            Error::UnknownField { .. } => 10,
            Error::MissingIdentity => 11,
            Error::Render { .. } => 70,
            Error::Io(_) => 71,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config(ConfigError::Conversion { .. }) => ErrorCategory::Conversion,
            Error::Config(ConfigError::Io { .. }) => ErrorCategory::Io,
            Error::Config(_) => ErrorCategory::Config,
            Error::UnknownField { .. } | Error::MissingIdentity => ErrorCategory::Usage,
            Error::Render { .. } | Error::Io(_) => ErrorCategory::Io,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::Config(ConfigError::Conversion { .. }) => ExitCode::ConversionError,
            Error::Config(ConfigError::Io { .. }) => ExitCode::IoError,
            Error::Config(ConfigError::InvalidOverride(_)) => ExitCode::ArgsError,
            Error::Config(_) => ExitCode::ConfigError,
            Error::UnknownField { .. } | Error::MissingIdentity => ExitCode::ArgsError,
            Error::Render { .. } => ExitCode::InternalError,
            Error::Io(_) => ExitCode::IoError,
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Config(ConfigError::Io { .. }) => "Cannot Read Config File",
            Error::Config(ConfigError::Parse { .. }) => "Config File Parse Error",
            Error::Config(ConfigError::UnsupportedFormat { .. }) => "Unsupported Config Format",
            Error::Config(ConfigError::InvalidOverride(_)) => "Invalid Override",
            Error::Config(ConfigError::Conversion { .. }) => "Invalid Configuration Value",
            Error::UnknownField { .. } => "Unknown Field",
            Error::MissingIdentity => "Missing Client Identity",
            Error::Render { .. } => "Output Error",
            Error::Io(_) => "I/O Error",
        }
    }

    /// Returns a remediation hint for humans.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Config(ConfigError::Io { .. }) => "Check the --config path, RCC_CONFIG_FILE and file permissions",
            Error::Config(ConfigError::Parse { .. }) => "Fix the syntax error at the reported location",
            Error::Config(ConfigError::UnsupportedFormat { .. }) => {
                "Use a .properties, .toml, .yaml, .yml or .json file"
            }
            Error::Config(ConfigError::InvalidOverride(_)) => "Write overrides as --set KEY=VALUE",
            Error::Config(ConfigError::Conversion { .. }) => {
                "Correct the value at the reported key, or remove it to fall back"
            }
            Error::UnknownField { .. } => "Run 'rcc explain --help' for field names",
            Error::MissingIdentity => "Pass --key NAME or --type PATH",
            Error::Render { .. } => "Try --format json",
            Error::Io(_) => "Check that stdout and stderr are writable",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    pub code: u32,
    pub category: ErrorCategory,
    pub message: String,
    pub exit_code: i32,
    pub remediation: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub context: BTreeMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = BTreeMap::new();

        match err {
            Error::Config(ConfigError::Conversion { key, value, target, .. }) => {
                context.insert("key".to_string(), serde_json::json!(key));
                context.insert("value".to_string(), serde_json::json!(value));
                context.insert("target".to_string(), serde_json::json!(target));
            }
            Error::Config(ConfigError::Io { path, .. })
            | Error::Config(ConfigError::Parse { path, .. })
            | Error::Config(ConfigError::UnsupportedFormat { path }) => {
                context.insert("path".to_string(), serde_json::json!(path.display().to_string()));
            }
            Error::UnknownField { name, .. } => {
                context.insert("field".to_string(), serde_json::json!(name));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            exit_code: err.exit_code().as_i32(),
            remediation: err.remediation().to_string(),
            context,
        }
    }
}

impl StructuredError {
    /// Serialize to pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        red = red,
        cyan = cyan,
        reset = reset,
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}
