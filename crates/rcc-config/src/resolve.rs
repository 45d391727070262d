//! Config file discovery and assembly of the standard source stack.
//!
//! File resolution order: CLI argument → environment variables → XDG paths → system paths.
//! Source stack, highest first: overrides → environment → config file → defaults.

use std::path::{Path, PathBuf};

use crate::env::EnvSource;
use crate::error::{ConfigError, ConfigResult};
use crate::file::{FileFormat, FileSource};
use crate::layered::LayeredConfig;
use crate::source::MapSource;

/// Where the application config file was found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FileOrigin {
    /// Explicitly provided via CLI argument.
    CliArgument,

    /// Set via environment variable.
    Environment,

    /// Found in XDG config directory.
    XdgConfig,

    /// Found in /etc/rcc/.
    SystemConfig,

    /// No file; built-in defaults only.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for FileOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileOrigin::CliArgument => write!(f, "CLI argument"),
            FileOrigin::Environment => write!(f, "environment variable"),
            FileOrigin::XdgConfig => write!(f, "XDG config"),
            FileOrigin::SystemConfig => write!(f, "system config"),
            FileOrigin::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Result of config file discovery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Path to the config file (or None if not found).
    pub path: Option<PathBuf>,

    /// Where it came from (for diagnostics).
    pub origin: FileOrigin,
}

/// Environment variable names.
pub const ENV_CONFIG_FILE: &str = "RCC_CONFIG_FILE";
pub const ENV_CONFIG_DIR: &str = "RCC_CONFIG_DIR";

/// Base name of the application config file.
const CONFIG_BASENAME: &str = "application";

/// Application name for XDG directories.
const APP_NAME: &str = "rcc";

/// Directories searched after the CLI and environment.
#[derive(Debug, Clone)]
pub struct SearchRoots {
    /// Per-user config directory (`~/.config/rcc`).
    pub user: Option<PathBuf>,
    /// System config directory (`/etc/rcc`).
    pub system: PathBuf,
}

impl SearchRoots {
    /// The platform's standard locations.
    pub fn standard() -> Self {
        Self {
            user: xdg_config_dir(),
            system: system_config_dir(),
        }
    }
}

/// Find the application config file using the standard resolution order.
///
/// 1. Explicit CLI path (returned even if missing, so loading reports it)
/// 2. RCC_CONFIG_FILE environment variable
/// 3. RCC_CONFIG_DIR environment variable + `application.<ext>`
/// 4. XDG config directory (~/.config/rcc/)
/// 5. System config (/etc/rcc/)
/// 6. Built-in defaults (None)
pub fn discover_config_file(cli_path: Option<&Path>) -> DiscoveredFile {
    discover_config_file_in(
        cli_path,
        &|key| std::env::var(key).ok(),
        &SearchRoots::standard(),
    )
}

/// [`discover_config_file`] with an injected environment and search roots.
pub fn discover_config_file_in(
    cli_path: Option<&Path>,
    env_lookup: &dyn Fn(&str) -> Option<String>,
    roots: &SearchRoots,
) -> DiscoveredFile {
    // 1. CLI argument
    if let Some(path) = cli_path {
        return found(path.to_path_buf(), FileOrigin::CliArgument);
    }

    // 2. Environment variable (direct path)
    if let Some(env_path) = env_lookup(ENV_CONFIG_FILE) {
        let path = PathBuf::from(env_path);
        if path.is_file() {
            return found(path, FileOrigin::Environment);
        }
        tracing::warn!(path = %path.display(), "{} points to a missing file", ENV_CONFIG_FILE);
    }

    // 3. Environment variable (config dir)
    if let Some(config_dir) = env_lookup(ENV_CONFIG_DIR) {
        if let Some(path) = find_in_dir(Path::new(&config_dir)) {
            return found(path, FileOrigin::Environment);
        }
    }

    // 4. XDG config directory
    if let Some(path) = roots.user.as_deref().and_then(find_in_dir) {
        return found(path, FileOrigin::XdgConfig);
    }

    // 5. System config
    if let Some(path) = find_in_dir(&roots.system) {
        return found(path, FileOrigin::SystemConfig);
    }

    // 6. Built-in default (None)
    DiscoveredFile::default()
}

fn found(path: PathBuf, origin: FileOrigin) -> DiscoveredFile {
    tracing::debug!(path = %path.display(), %origin, "config file resolved");
    DiscoveredFile {
        path: Some(path),
        origin,
    }
}

/// The first `application.<ext>` file in `dir`, by extension order.
pub fn find_in_dir(dir: &Path) -> Option<PathBuf> {
    FileFormat::EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{}.{}", CONFIG_BASENAME, ext)))
        .find(|path| path.is_file())
}

/// Get the XDG config directory for rcc.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Get the system config directory.
pub fn system_config_dir() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME)
}

/// Options for [`load_layered`].
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Explicit config file (highest priority for discovery).
    pub config_file: Option<PathBuf>,
    /// `KEY=VALUE` overrides, applied above every other source.
    pub overrides: Vec<String>,
    /// Whether to include the process environment.
    pub use_env: bool,
    /// Built-in defaults layer.
    pub defaults: MapSource,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            config_file: None,
            overrides: Vec::new(),
            use_env: true,
            defaults: MapSource::defaults(),
        }
    }
}

/// The assembled configuration and the file it was read from.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: LayeredConfig,
    pub file: DiscoveredFile,
}

/// Assemble the standard layered configuration.
pub fn load_layered(options: &LoadOptions) -> ConfigResult<LoadedConfig> {
    let file = discover_config_file(options.config_file.as_deref());
    assemble(options, file, EnvSource::new())
}

/// [`load_layered`] with an injected environment and search roots.
pub fn load_layered_in(
    options: &LoadOptions,
    env_lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'static,
    roots: &SearchRoots,
) -> ConfigResult<LoadedConfig> {
    let file = discover_config_file_in(options.config_file.as_deref(), &env_lookup, roots);
    assemble(options, file, EnvSource::with_lookup(env_lookup))
}

fn assemble(options: &LoadOptions, file: DiscoveredFile, env: EnvSource) -> ConfigResult<LoadedConfig> {
    let mut config = LayeredConfig::new();

    if !options.overrides.is_empty() {
        let mut overrides = MapSource::new("overrides");
        for assignment in &options.overrides {
            overrides
                .insert_assignment(assignment)
                .map_err(ConfigError::InvalidOverride)?;
        }
        config.add_source(overrides);
    }

    if options.use_env {
        config.add_source(env);
    }

    if let Some(path) = &file.path {
        config.add_source(FileSource::load(path)?);
    }

    config.add_source(options.defaults.clone());

    tracing::debug!(sources = ?config.source_names(), "configuration assembled");
    Ok(LoadedConfig { config, file })
}
