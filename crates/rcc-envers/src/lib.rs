//! Audit/versioning settings for the persistence layer.
//!
//! [`EnversConfig`] is read from a configuration source and handed to
//! [`contribute_boot_properties`], which forwards each setting to a
//! [`PropertySink`] under its well-known boot property name.

pub mod settings;
pub mod sink;

pub use settings::{EnversConfig, DEFAULT_PREFIX};
pub use sink::{contribute_boot_properties, AbsentPolicy, PropertySink, PropertyValue};
