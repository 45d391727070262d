//! Output formats and payload rendering.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::error::{Error, Result};

/// Supported output formats for CLI commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty-printed JSON (default for machine consumption)
    #[default]
    Json,

    /// TOML document
    Toml,

    /// Short human-readable text
    Summary,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Toml => write!(f, "toml"),
            OutputFormat::Summary => write!(f, "summary"),
        }
    }
}

/// Render `payload` in `format`; `summary` builds the text form on demand.
pub fn render<T, F>(payload: &T, format: OutputFormat, summary: F) -> Result<String>
where
    T: Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(payload).map_err(|e| Error::Render {
            format: "json",
            message: e.to_string(),
        }),
        OutputFormat::Toml => toml::to_string_pretty(payload).map_err(|e| Error::Render {
            format: "toml",
            message: e.to_string(),
        }),
        OutputFormat::Summary => Ok(summary(payload)),
    }
}

/// Write rendered output followed by a newline and flush.
pub fn write_output<W: Write>(writer: &mut W, text: &str) -> Result<()> {
    writeln!(writer, "{}", text)?;
    writer.flush()?;
    Ok(())
}
