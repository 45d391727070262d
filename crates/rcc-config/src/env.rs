//! Environment variable source.
//!
//! Property names rarely survive as environment variable names, so each
//! lookup tries three spellings of the key:
//! 1. the key verbatim
//! 2. every non-alphanumeric character replaced by `_`
//! 3. form 2 upper-cased
//!
//! `quarkus.rest-client."my-client".url` is therefore also found as
//! `QUARKUS_REST_CLIENT__MY_CLIENT__URL`.

use std::fmt;
use std::sync::Arc;

use crate::source::{ConfigSource, ORDINAL_ENV};

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Reads values from the process environment (or an injected lookup).
#[derive(Clone)]
pub struct EnvSource {
    ordinal: i32,
    lookup: EnvLookup,
}

impl EnvSource {
    /// Source backed by the real process environment.
    pub fn new() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok())
    }

    /// Source backed by a custom lookup function.
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            ordinal: ORDINAL_ENV,
            lookup: Arc::new(lookup),
        }
    }

    /// Set the ordinal.
    pub fn with_ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EnvSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvSource")
            .field("ordinal", &self.ordinal)
            .finish_non_exhaustive()
    }
}

impl ConfigSource for EnvSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn ordinal(&self) -> i32 {
        self.ordinal
    }

    fn get_value(&self, key: &str) -> Option<String> {
        env_candidates(key)
            .into_iter()
            .find_map(|candidate| (self.lookup)(&candidate))
    }

    fn keys(&self) -> Vec<String> {
        Vec::new()
    }
}

/// The environment variable names probed for `key`, in order, deduplicated.
pub fn env_candidates(key: &str) -> Vec<String> {
    let sanitized: String = key
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let upper = sanitized.to_ascii_uppercase();

    let mut out = vec![key.to_string()];
    for candidate in [sanitized, upper] {
        if !out.contains(&candidate) {
            out.push(candidate);
        }
    }
    out
}
