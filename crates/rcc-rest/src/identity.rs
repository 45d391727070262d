//! Client identities.

use std::fmt;

/// Who a client configuration belongs to.
///
/// Each variant carries exactly what its probing strategy needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClientIdentity {
    /// An opaque configuration key such as `my-client`.
    Key(String),
    /// A type, known by its full path and its short name.
    Type { name: String, simple_name: String },
}

impl ClientIdentity {
    /// Identity for an opaque configuration key.
    pub fn key(key: impl Into<String>) -> Self {
        ClientIdentity::Key(key.into())
    }

    /// Identity for a type path; the short name is the last path segment.
    ///
    /// `::`, `.` and `$` all separate segments, and generic arguments are
    /// ignored when picking the short name.
    pub fn for_type_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let simple_name = simple_name_of(&name).to_string();
        ClientIdentity::Type { name, simple_name }
    }

    /// Identity for a type with an explicit short name.
    pub fn for_type_with_simple_name(name: impl Into<String>, simple_name: impl Into<String>) -> Self {
        ClientIdentity::Type {
            name: name.into(),
            simple_name: simple_name.into(),
        }
    }

    /// Identity for a Rust type, using its type path.
    pub fn of<T: ?Sized>() -> Self {
        Self::for_type_name(std::any::type_name::<T>())
    }

    /// The text this identity is displayed and reported as.
    pub fn as_str(&self) -> &str {
        match self {
            ClientIdentity::Key(key) => key,
            ClientIdentity::Type { name, .. } => name,
        }
    }
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientIdentity::Key(key) => write!(f, "key {}", key),
            ClientIdentity::Type { name, .. } => write!(f, "type {}", name),
        }
    }
}

fn simple_name_of(name: &str) -> &str {
    let base = name.split('<').next().unwrap_or(name);
    let last_colon = base.rfind("::").map(|i| i + 2);
    let last_other = base.rfind(|c: char| c == '.' || c == '$').map(|i| i + 1);
    let start = last_colon.max(last_other).unwrap_or(0);
    &base[start..]
}
