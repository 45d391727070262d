//! Layered configuration sources for rcc.
//!
//! This crate provides:
//! - The `ConfigSource` trait and typed `get_optional_value` lookup
//! - In-memory, environment and file sources (properties, TOML, YAML, JSON)
//! - Ordinal-ordered layering with provenance
//! - Composite key quoting and splitting
//! - Config file discovery (CLI → env → XDG → system → defaults)

pub mod convert;
pub mod env;
pub mod error;
pub mod file;
pub mod keys;
pub mod layered;
pub mod resolve;
pub mod source;

pub use convert::FromConfigValue;
pub use env::EnvSource;
pub use error::{ConfigError, ConfigResult};
pub use file::{FileFormat, FileSource};
pub use layered::{LayeredConfig, Lookup};
pub use resolve::{discover_config_file, load_layered, DiscoveredFile, FileOrigin, LoadOptions};
pub use source::{ConfigSource, ConfigSourceExt, MapSource};
