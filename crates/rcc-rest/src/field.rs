//! Field descriptors for the client configuration record.
//!
//! Field names are hyphenated lowercase and must match configuration keys
//! exactly.

use std::fmt;

use serde::Serialize;

use crate::query_style::QueryParamStyle;

/// The value type a field is parsed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    String,
    /// 64-bit signed integer.
    Long,
    /// 32-bit signed integer.
    Integer,
    Boolean,
    QueryParamStyle,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::String => write!(f, "string"),
            FieldKind::Long => write!(f, "long"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Boolean => write!(f, "boolean"),
            FieldKind::QueryParamStyle => write!(f, "query-param-style"),
        }
    }
}

/// One configurable attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Rendered as `****` unless secrets are requested.
    pub secret: bool,
}

impl Field {
    const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            secret: false,
        }
    }

    const fn secret(name: &'static str) -> Self {
        Self {
            name,
            kind: FieldKind::String,
            secret: true,
        }
    }
}

pub const URL: Field = Field::new("url", FieldKind::String);
pub const URI: Field = Field::new("uri", FieldKind::String);
pub const SCOPE: Field = Field::new("scope", FieldKind::String);
pub const PROVIDERS: Field = Field::new("providers", FieldKind::String);
pub const CONNECT_TIMEOUT: Field = Field::new("connect-timeout", FieldKind::Long);
pub const READ_TIMEOUT: Field = Field::new("read-timeout", FieldKind::Long);
pub const FOLLOW_REDIRECTS: Field = Field::new("follow-redirects", FieldKind::Boolean);
pub const PROXY_ADDRESS: Field = Field::new("proxy-address", FieldKind::String);
pub const QUERY_PARAM_STYLE: Field = Field::new("query-param-style", FieldKind::QueryParamStyle);
pub const TRUST_STORE: Field = Field::new("trust-store", FieldKind::String);
pub const TRUST_STORE_PASSWORD: Field = Field::secret("trust-store-password");
pub const TRUST_STORE_TYPE: Field = Field::new("trust-store-type", FieldKind::String);
pub const KEY_STORE: Field = Field::new("key-store", FieldKind::String);
pub const KEY_STORE_PASSWORD: Field = Field::secret("key-store-password");
pub const KEY_STORE_TYPE: Field = Field::new("key-store-type", FieldKind::String);
pub const HOSTNAME_VERIFIER: Field = Field::new("hostname-verifier", FieldKind::String);
pub const CONNECTION_TTL: Field = Field::new("connection-ttl", FieldKind::Integer);
pub const CONNECTION_POOL_SIZE: Field = Field::new("connection-pool-size", FieldKind::Integer);
pub const MAX_REDIRECTS: Field = Field::new("max-redirects", FieldKind::Integer);

/// Every field, in load order.
pub const FIELDS: [Field; 19] = [
    URL,
    URI,
    SCOPE,
    PROVIDERS,
    CONNECT_TIMEOUT,
    READ_TIMEOUT,
    FOLLOW_REDIRECTS,
    PROXY_ADDRESS,
    QUERY_PARAM_STYLE,
    TRUST_STORE,
    TRUST_STORE_PASSWORD,
    TRUST_STORE_TYPE,
    KEY_STORE,
    KEY_STORE_PASSWORD,
    KEY_STORE_TYPE,
    HOSTNAME_VERIFIER,
    CONNECTION_TTL,
    CONNECTION_POOL_SIZE,
    MAX_REDIRECTS,
];

/// Look up a field by its hyphenated name.
pub fn field(name: &str) -> Option<&'static Field> {
    FIELDS.iter().find(|f| f.name == name)
}

/// A resolved value of any field kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Long(i64),
    Integer(i32),
    Boolean(bool),
    QueryParamStyle(QueryParamStyle),
}

impl FieldValue {
    pub fn kind(&self) -> FieldKind {
        match self {
            FieldValue::String(_) => FieldKind::String,
            FieldValue::Long(_) => FieldKind::Long,
            FieldValue::Integer(_) => FieldKind::Integer,
            FieldValue::Boolean(_) => FieldKind::Boolean,
            FieldValue::QueryParamStyle(_) => FieldKind::QueryParamStyle,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(v) => f.write_str(v),
            FieldValue::Long(v) => write!(f, "{}", v),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Boolean(v) => write!(f, "{}", v),
            FieldValue::QueryParamStyle(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_field_names_unique_and_hyphenated() {
        let names: HashSet<_> = FIELDS.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), FIELDS.len());
        for f in FIELDS {
            assert!(
                f.name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '-'),
                "{}",
                f.name
            );
        }
    }

    #[test]
    fn test_field_lookup() {
        assert_eq!(field("connect-timeout"), Some(&CONNECT_TIMEOUT));
        assert_eq!(field("connect-timeout").unwrap().kind, FieldKind::Long);
        assert_eq!(field("connection-ttl").unwrap().kind, FieldKind::Integer);
        assert!(field("connectTimeout").is_none());
    }

    #[test]
    fn test_only_passwords_are_secret() {
        let secrets: Vec<_> = FIELDS.iter().filter(|f| f.secret).map(|f| f.name).collect();
        assert_eq!(secrets, vec!["trust-store-password", "key-store-password"]);
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Long(5000).to_string(), "5000");
        assert_eq!(
            FieldValue::QueryParamStyle(QueryParamStyle::ArrayPairs).to_string(),
            "ARRAY_PAIRS"
        );
        assert_eq!(FieldValue::Boolean(true).kind(), FieldKind::Boolean);
    }
}
