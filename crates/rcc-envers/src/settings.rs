//! Envers boot property names and the settings forwarded under them.

use rcc_config::{ConfigResult, ConfigSource, ConfigSourceExt};
use serde::Serialize;

pub const STORE_DATA_AT_DELETE: &str = "org.hibernate.envers.store_data_at_delete";
pub const AUDIT_TABLE_SUFFIX: &str = "org.hibernate.envers.audit_table_suffix";
pub const AUDIT_TABLE_PREFIX: &str = "org.hibernate.envers.audit_table_prefix";
pub const REVISION_FIELD_NAME: &str = "org.hibernate.envers.revision_field_name";
pub const REVISION_TYPE_FIELD_NAME: &str = "org.hibernate.envers.revision_type_field_name";

/// Configuration root the settings are read from.
pub const DEFAULT_PREFIX: &str = "quarkus.hibernate-envers.";

/// Audit settings as seen by the application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnversConfig {
    /// Keep entity data in the revision written on delete.
    pub store_data_at_delete: bool,
    pub audit_table_suffix: Option<String>,
    pub audit_table_prefix: Option<String>,
    pub revision_field_name: Option<String>,
    pub revision_type_field_name: Option<String>,
}

impl Default for EnversConfig {
    fn default() -> Self {
        Self {
            store_data_at_delete: false,
            audit_table_suffix: Some("_AUD".to_string()),
            audit_table_prefix: None,
            revision_field_name: Some("REV".to_string()),
            revision_type_field_name: Some("REVTYPE".to_string()),
        }
    }
}

impl EnversConfig {
    /// Read settings under [`DEFAULT_PREFIX`], keeping defaults for absent keys.
    pub fn load<S: ConfigSource + ?Sized>(source: &S) -> ConfigResult<Self> {
        Self::load_with_prefix(source, DEFAULT_PREFIX)
    }

    pub fn load_with_prefix<S: ConfigSource + ?Sized>(source: &S, prefix: &str) -> ConfigResult<Self> {
        let key = |name: &str| format!("{}{}", prefix, name);
        let defaults = Self::default();

        let config = Self {
            store_data_at_delete: source
                .get_optional_value(&key("store-data-at-delete"))?
                .unwrap_or(defaults.store_data_at_delete),
            audit_table_suffix: source
                .get_optional_value(&key("audit-table-suffix"))?
                .or(defaults.audit_table_suffix),
            audit_table_prefix: source
                .get_optional_value(&key("audit-table-prefix"))?
                .or(defaults.audit_table_prefix),
            revision_field_name: source
                .get_optional_value(&key("revision-field-name"))?
                .or(defaults.revision_field_name),
            revision_type_field_name: source
                .get_optional_value(&key("revision-type-field-name"))?
                .or(defaults.revision_type_field_name),
        };
        tracing::debug!(prefix, ?config, "loaded envers settings");
        Ok(config)
    }
}
