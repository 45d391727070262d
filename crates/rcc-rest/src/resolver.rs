//! Layered resolution of per-client configuration values.
//!
//! Candidate keys, probed in order until one holds a value:
//!
//! | identity                 | candidates                                              |
//! |--------------------------|---------------------------------------------------------|
//! | key `K`                  | `P K.f`, `P "K".f`                                      |
//! | type `F` with short `S`  | `P "F".f`, `P S.f`, `P "S".f`                           |
//!
//! where `P` is the namespace prefix and `f` the field name.

use rcc_config::keys::{compose_key, quote};
use rcc_config::{ConfigResult, ConfigSource, ConfigSourceExt, FromConfigValue};
use serde::Serialize;

use crate::field::{Field, FieldKind, FieldValue};
use crate::identity::ClientIdentity;
use crate::probe::{probe_first, Probe};
use crate::query_style::QueryParamStyle;

/// Configuration root for REST clients.
pub const DEFAULT_PREFIX: &str = "quarkus.rest-client.";

/// Resolves client fields against an explicitly supplied source.
///
/// Holds no state between calls; every resolution is a fresh probe.
#[derive(Debug, Clone)]
pub struct ClientConfigResolver<'a, S: ConfigSource + ?Sized> {
    source: &'a S,
    prefix: String,
}

impl<'a, S: ConfigSource + ?Sized> ClientConfigResolver<'a, S> {
    /// Resolver using [`DEFAULT_PREFIX`].
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            prefix: DEFAULT_PREFIX.to_string(),
        }
    }

    /// Use a different namespace prefix. A trailing `.` is added if missing.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.is_empty() && !prefix.ends_with('.') {
            prefix.push('.');
        }
        self.prefix = prefix;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Composite keys for `field`, in probe order.
    pub fn candidate_keys(&self, identity: &ClientIdentity, field: &str) -> Vec<String> {
        let prefix = self.prefix.as_str();
        match identity {
            ClientIdentity::Key(key) => vec![
                compose_key(prefix, key, field),
                compose_key(prefix, &quote(key), field),
            ],
            ClientIdentity::Type { name, simple_name } => vec![
                compose_key(prefix, &quote(name), field),
                compose_key(prefix, simple_name, field),
                compose_key(prefix, &quote(simple_name), field),
            ],
        }
    }

    /// Resolve one field as `T`.
    ///
    /// Absent everywhere is `Ok(None)`. A present value that does not
    /// convert is an error naming the offending key; later candidates are
    /// not consulted.
    pub fn resolve<T: FromConfigValue>(
        &self,
        identity: &ClientIdentity,
        field: &str,
    ) -> ConfigResult<Option<T>> {
        Ok(self.resolve_with_key(identity, field)?.map(|p| p.value))
    }

    /// Like [`resolve`](Self::resolve), also reporting the matching key.
    pub fn resolve_with_key<T: FromConfigValue>(
        &self,
        identity: &ClientIdentity,
        field: &str,
    ) -> ConfigResult<Option<Probe<T>>> {
        let found = probe_first(self.candidate_keys(identity, field), |key| {
            self.source.get_optional_value::<T>(key)
        })?;
        if let Some(probe) = &found {
            tracing::debug!(identity = identity.as_str(), field, key = %probe.key, "resolved client config value");
        }
        Ok(found)
    }

    /// Resolve a field described by a [`Field`] into a [`FieldValue`].
    pub fn resolve_field(
        &self,
        identity: &ClientIdentity,
        field: &Field,
    ) -> ConfigResult<Option<Probe<FieldValue>>> {
        fn wrap<T>(probe: Option<Probe<T>>, f: fn(T) -> FieldValue) -> Option<Probe<FieldValue>> {
            probe.map(|p| Probe {
                value: f(p.value),
                key: p.key,
            })
        }

        let name = field.name;
        Ok(match field.kind {
            FieldKind::String => wrap(self.resolve_with_key::<String>(identity, name)?, FieldValue::String),
            FieldKind::Long => wrap(self.resolve_with_key::<i64>(identity, name)?, FieldValue::Long),
            FieldKind::Integer => wrap(self.resolve_with_key::<i32>(identity, name)?, FieldValue::Integer),
            FieldKind::Boolean => wrap(self.resolve_with_key::<bool>(identity, name)?, FieldValue::Boolean),
            FieldKind::QueryParamStyle => wrap(
                self.resolve_with_key::<QueryParamStyle>(identity, name)?,
                FieldValue::QueryParamStyle,
            ),
        })
    }

    /// Report every candidate for `field` and the outcome of resolution.
    pub fn explain(&self, identity: &ClientIdentity, field: &Field) -> Explanation {
        let candidates = self
            .candidate_keys(identity, field.name)
            .into_iter()
            .map(|key| {
                let raw = self.source.get_value(&key);
                Candidate { key, raw }
            })
            .collect();

        let (matched_key, value, error) = match self.resolve_field(identity, field) {
            Ok(Some(probe)) => (Some(probe.key), Some(probe.value), None),
            Ok(None) => (None, None, None),
            Err(err) => (err.key().map(str::to_string), None, Some(err.to_string())),
        };

        Explanation {
            identity: identity.as_str().to_string(),
            field: field.name,
            kind: field.kind,
            candidates,
            matched_key,
            value,
            error,
        }
    }
}

/// One probed key and the raw text found there, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    pub key: String,
    pub raw: Option<String>,
}

/// Diagnostic account of a single field resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub identity: String,
    pub field: &'static str,
    pub kind: FieldKind,
    pub candidates: Vec<Candidate>,
    /// Key that supplied the value (or failed to convert).
    pub matched_key: Option<String>,
    pub value: Option<FieldValue>,
    pub error: Option<String>,
}
