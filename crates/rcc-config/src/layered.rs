//! Ordered stack of configuration sources.

use std::collections::BTreeSet;
use std::fmt;

use crate::source::ConfigSource;

/// A raw value together with the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    pub value: String,
    pub source: String,
    pub ordinal: i32,
}

/// Several sources queried in descending ordinal order.
///
/// The first source that defines a key supplies its value, even if that
/// value is blank; a blank value therefore hides lower layers. Sources with
/// equal ordinals keep their insertion order.
#[derive(Default)]
pub struct LayeredConfig {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl LayeredConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source, builder style.
    pub fn with_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
        self.add_source(source);
        self
    }

    /// Add a source and restore the ordinal ordering.
    pub fn add_source<S: ConfigSource + 'static>(&mut self, source: S) {
        tracing::trace!(source = source.name(), ordinal = source.ordinal(), "adding config source");
        self.sources.push(Box::new(source));
        // stable: equal ordinals keep insertion order
        self.sources.sort_by_key(|s| std::cmp::Reverse(s.ordinal()));
    }

    /// Look up `key` and report which source supplied it.
    pub fn lookup(&self, key: &str) -> Option<Lookup> {
        self.sources.iter().find_map(|source| {
            source.get_value(key).map(|value| Lookup {
                value,
                source: source.name().to_string(),
                ordinal: source.ordinal(),
            })
        })
    }

    /// Names and ordinals of the stacked sources, highest first.
    pub fn source_names(&self) -> Vec<(String, i32)> {
        self.sources
            .iter()
            .map(|s| (s.name().to_string(), s.ordinal()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl fmt::Debug for LayeredConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayeredConfig")
            .field("sources", &self.source_names())
            .finish()
    }
}

impl ConfigSource for LayeredConfig {
    fn name(&self) -> &str {
        "layered"
    }

    fn get_value(&self, key: &str) -> Option<String> {
        self.lookup(key).map(|l| l.value)
    }

    fn keys(&self) -> Vec<String> {
        let mut keys = BTreeSet::new();
        for source in &self.sources {
            keys.extend(source.keys());
        }
        keys.into_iter().collect()
    }
}
