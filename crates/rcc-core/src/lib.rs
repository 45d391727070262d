//! rcc core library.
//!
//! Shared pieces of the `rcc` command line:
//! - Structured logging setup
//! - The CLI error taxonomy and stable exit codes
//! - Output formats and command payloads

pub mod error;
pub mod exit_codes;
pub mod logging;
pub mod output;
pub mod report;

pub use error::{Error, Result};
pub use exit_codes::ExitCode;
pub use output::OutputFormat;
