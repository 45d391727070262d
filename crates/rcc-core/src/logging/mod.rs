//! Structured logging for rcc.
//!
//! Provides dual-mode logging:
//! - Human-readable console output for interactive use
//! - Machine-parseable JSONL for scripted use
//!
//! stdout is reserved for command payloads; all log output goes to stderr.
//! Each invocation gets a `run_id` that is attached to a root span.

pub mod config;

pub use config::{LogConfig, LogFormat, LogLevel};

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events are shown at the configured level.
const LOG_TARGETS: &[&str] = &["rcc", "rcc_core", "rcc_config", "rcc_rest", "rcc_envers"];

/// Build the filter for `config`.
pub fn build_filter(config: &LogConfig) -> EnvFilter {
    if let Some(directives) = &config.directives {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return filter;
        }
    }
    let level = LevelFilter::from(config.level);
    let directives = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");
    EnvFilter::new(directives)
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs.
pub fn init_logging(config: &LogConfig) {
    let filter = build_filter(config);

    match config.format {
        LogFormat::Human => {
            let use_ansi = std::io::stderr().is_terminal();
            let fmt_layer = fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(use_ansi);

            if config.timestamps {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer)
                    .init();
            } else {
                tracing_subscriber::registry()
                    .with(filter)
                    .with(fmt_layer.without_time())
                    .init();
            }
        }
        LogFormat::Jsonl => {
            let json_layer = fmt::layer()
                .json()
                .with_writer(std::io::stderr)
                .with_current_span(true)
                .with_span_list(false);
            tracing_subscriber::registry()
                .with(filter)
                .with(json_layer)
                .init();
        }
    }
}

/// Generate a unique run ID for this invocation.
pub fn generate_run_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    // first 12 hex chars
    format!("run-{}", &uuid.simple().to_string()[..12])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_run_id() {
        let id1 = generate_run_id();
        let id2 = generate_run_id();

        assert!(id1.starts_with("run-"));
        assert_ne!(id1, id2);
        assert_eq!(id1.len(), 16);
        assert!(id1[4..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_filter_from_level() {
        let config = LogConfig::default().with_level(LogLevel::Debug);
        let rendered = build_filter(&config).to_string();
        assert!(rendered.contains("rcc_rest=debug"));
        assert!(rendered.contains("rcc_config=debug"));
    }

    #[test]
    fn test_filter_quiet_levels() {
        let off = build_filter(&LogConfig::default().with_level(LogLevel::Off)).to_string();
        assert!(off.contains("rcc_envers=off"));
        let errors = build_filter(&LogConfig::default().with_level(LogLevel::Error)).to_string();
        assert!(errors.contains("rcc_core=error"));
    }

    #[test]
    fn test_filter_prefers_valid_directives() {
        let config = LogConfig {
            directives: Some("rcc_config=trace".to_string()),
            ..LogConfig::default()
        };
        let rendered = build_filter(&config).to_string();
        assert!(rendered.contains("rcc_config=trace"));
        assert!(!rendered.contains("rcc_rest"));
    }

    #[test]
    fn test_filter_ignores_invalid_directives() {
        let config = LogConfig {
            directives: Some("rcc_config=loud".to_string()),
            ..LogConfig::default()
        };
        assert!(build_filter(&config).to_string().contains("rcc_rest=warn"));
    }
}
