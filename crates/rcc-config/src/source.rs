//! The configuration source abstraction and the in-memory source.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::convert::FromConfigValue;
use crate::error::{ConfigError, ConfigResult};

/// Ordinal used when a source does not choose one.
pub const DEFAULT_ORDINAL: i32 = 100;
/// Explicit overrides (`--set`, tests).
pub const ORDINAL_OVERRIDES: i32 = 400;
/// Process environment.
pub const ORDINAL_ENV: i32 = 300;
/// Application config file.
pub const ORDINAL_FILE: i32 = 250;
/// Built-in defaults.
pub const ORDINAL_DEFAULTS: i32 = 0;

/// A read-only view of raw configuration values.
///
/// Sources with a higher ordinal take precedence when stacked in a
/// [`LayeredConfig`](crate::layered::LayeredConfig).
pub trait ConfigSource: Send + Sync {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Precedence of this source (higher wins).
    fn ordinal(&self) -> i32 {
        DEFAULT_ORDINAL
    }

    /// Raw text for `key`, or `None` when the source does not define it.
    fn get_value(&self, key: &str) -> Option<String>;

    /// Every key this source can enumerate.
    ///
    /// Sources that cannot enumerate their keys return an empty list.
    fn keys(&self) -> Vec<String>;
}

/// Typed lookup on top of any [`ConfigSource`].
pub trait ConfigSourceExt: ConfigSource {
    /// Look up `key` and convert it to `T`.
    ///
    /// A missing or blank value is `Ok(None)`. A present value that does not
    /// parse is a [`ConfigError::Conversion`] naming `key`.
    fn get_optional_value<T: FromConfigValue>(&self, key: &str) -> ConfigResult<Option<T>> {
        let Some(raw) = self.get_value(key) else {
            return Ok(None);
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        match T::from_config_value(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(reason) => {
                tracing::warn!(key, target_type = T::TYPE_NAME, %reason, "config value conversion failed");
                Err(ConfigError::Conversion {
                    key: key.to_string(),
                    value: raw,
                    target: T::TYPE_NAME,
                    reason,
                })
            }
        }
    }
}

impl<S: ConfigSource + ?Sized> ConfigSourceExt for S {}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn ordinal(&self) -> i32 {
        (**self).ordinal()
    }

    fn get_value(&self, key: &str) -> Option<String> {
        (**self).get_value(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn ordinal(&self) -> i32 {
        (**self).ordinal()
    }

    fn get_value(&self, key: &str) -> Option<String> {
        (**self).get_value(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn ordinal(&self) -> i32 {
        (**self).ordinal()
    }

    fn get_value(&self, key: &str) -> Option<String> {
        (**self).get_value(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

/// An in-memory source backed by a sorted map.
#[derive(Debug, Clone)]
pub struct MapSource {
    name: String,
    ordinal: i32,
    values: BTreeMap<String, String>,
}

impl MapSource {
    /// Create an empty source with the overrides ordinal.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ordinal: ORDINAL_OVERRIDES,
            values: BTreeMap::new(),
        }
    }

    /// Create the built-in defaults layer.
    pub fn defaults() -> Self {
        Self::new("defaults").with_ordinal(ORDINAL_DEFAULTS)
    }

    /// Set the ordinal.
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Add a value, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Add or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Parse and insert a `key=value` assignment.
    ///
    /// Only the first `=` separates; the value may contain more.
    pub fn insert_assignment(&mut self, assignment: &str) -> Result<(), String> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", assignment))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(format!("empty key in '{}'", assignment));
        }
        self.insert(key, value);
        Ok(())
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the source holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ConfigSource for MapSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn get_value(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut source = MapSource::new("memory");
        for (k, v) in iter {
            source.insert(k, v);
        }
        source
    }
}
