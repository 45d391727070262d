//! Forwarding settings to a boot property collector.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::settings::{
    EnversConfig, AUDIT_TABLE_PREFIX, AUDIT_TABLE_SUFFIX, REVISION_FIELD_NAME,
    REVISION_TYPE_FIELD_NAME, STORE_DATA_AT_DELETE,
};

/// A boot property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Str(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Bool(v) => write!(f, "{}", v),
            PropertyValue::Str(v) => f.write_str(v),
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        PropertyValue::Bool(v)
    }
}

impl From<String> for PropertyValue {
    fn from(v: String) -> Self {
        PropertyValue::Str(v)
    }
}

/// Receives boot properties one at a time.
pub trait PropertySink {
    fn accept(&mut self, name: &str, value: PropertyValue);
}

impl PropertySink for BTreeMap<String, PropertyValue> {
    fn accept(&mut self, name: &str, value: PropertyValue) {
        self.insert(name.to_string(), value);
    }
}

impl<F: FnMut(&str, PropertyValue)> PropertySink for F {
    fn accept(&mut self, name: &str, value: PropertyValue) {
        self(name, value)
    }
}

/// What to do with a setting that has no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AbsentPolicy {
    /// Do not contribute the property.
    #[default]
    Omit,
    /// Contribute an empty string.
    EmptyString,
}

/// Contribute every setting to `sink` in fixed order.
///
/// Returns the number of properties contributed.
pub fn contribute_boot_properties<S: PropertySink + ?Sized>(
    config: &EnversConfig,
    sink: &mut S,
    absent: AbsentPolicy,
) -> usize {
    let mut contributed = 0;
    let mut optional = |sink: &mut S, name: &str, value: &Option<String>| match (value, absent) {
        (Some(v), _) => {
            sink.accept(name, PropertyValue::Str(v.clone()));
            contributed += 1;
        }
        (None, AbsentPolicy::EmptyString) => {
            sink.accept(name, PropertyValue::Str(String::new()));
            contributed += 1;
        }
        (None, AbsentPolicy::Omit) => {
            tracing::debug!(property = name, "omitting absent boot property");
        }
    };

    sink.accept(STORE_DATA_AT_DELETE, config.store_data_at_delete.into());
    optional(sink, AUDIT_TABLE_SUFFIX, &config.audit_table_suffix);
    optional(sink, AUDIT_TABLE_PREFIX, &config.audit_table_prefix);
    optional(sink, REVISION_FIELD_NAME, &config.revision_field_name);
    optional(sink, REVISION_TYPE_FIELD_NAME, &config.revision_type_field_name);

    1 + contributed
}
