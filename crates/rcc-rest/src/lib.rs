//! REST client configuration for rcc.
//!
//! Resolves the per-client record (base address, timeouts, TLS stores,
//! pooling, redirects) from any [`rcc_config::ConfigSource`]. A client is
//! named either by a configuration key or by its type name; each field is
//! looked up under a fixed sequence of candidate keys and the first one
//! with a value wins.

pub mod client_config;
pub mod discover;
pub mod field;
pub mod identity;
pub mod probe;
pub mod query_style;
pub mod resolver;
pub mod validate;

pub use client_config::{RestClientConfig, REDACTED};
pub use discover::configured_clients;
pub use field::{Field, FieldKind, FieldValue, FIELDS};
pub use identity::ClientIdentity;
pub use probe::{probe_first, Probe};
pub use query_style::QueryParamStyle;
pub use resolver::{Candidate, ClientConfigResolver, Explanation, DEFAULT_PREFIX};
pub use validate::{ConfigIssue, Severity};
