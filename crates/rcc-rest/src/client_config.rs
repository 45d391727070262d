//! The per-client configuration record.

use rcc_config::{ConfigError, ConfigResult, ConfigSource};
use serde::{Deserialize, Serialize};

use crate::field;
use crate::identity::ClientIdentity;
use crate::query_style::QueryParamStyle;
use crate::resolver::ClientConfigResolver;

/// Placeholder shown instead of secret values.
pub const REDACTED: &str = "****";

/// Resolved configuration for one REST client.
///
/// Every field is independently optional; absence means no layer set it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RestClientConfig {
    /// Base URL of the service. Either this or `uri` is normally required.
    pub url: Option<String>,
    /// Base URI of the service. Either this or `url` is normally required.
    pub uri: Option<String>,
    /// Injection scope name (fully qualified or short).
    pub scope: Option<String>,
    /// Provider type names to register, with optional priorities.
    pub providers: Option<String>,
    /// Connect timeout in milliseconds.
    pub connect_timeout: Option<i64>,
    /// Read timeout in milliseconds.
    pub read_timeout: Option<i64>,
    pub follow_redirects: Option<bool>,
    /// HTTP proxy as `host:port`.
    pub proxy_address: Option<String>,
    pub query_param_style: Option<QueryParamStyle>,
    pub trust_store: Option<String>,
    pub trust_store_password: Option<String>,
    /// Defaults to `JKS` downstream.
    pub trust_store_type: Option<String>,
    pub key_store: Option<String>,
    pub key_store_password: Option<String>,
    /// Defaults to `JKS` downstream.
    pub key_store_type: Option<String>,
    /// Type name of the host name verifier.
    pub hostname_verifier: Option<String>,
    /// Milliseconds an idle pooled connection survives; `0` disables eviction.
    pub connection_ttl: Option<i32>,
    pub connection_pool_size: Option<i32>,
    pub max_redirects: Option<i32>,
}

impl RestClientConfig {
    /// The record with every field absent.
    pub const EMPTY: RestClientConfig = RestClientConfig {
        url: None,
        uri: None,
        scope: None,
        providers: None,
        connect_timeout: None,
        read_timeout: None,
        follow_redirects: None,
        proxy_address: None,
        query_param_style: None,
        trust_store: None,
        trust_store_password: None,
        trust_store_type: None,
        key_store: None,
        key_store_password: None,
        key_store_type: None,
        hostname_verifier: None,
        connection_ttl: None,
        connection_pool_size: None,
        max_redirects: None,
    };

    /// Resolve every field for `identity`.
    ///
    /// All fields are probed in the fixed field order. The first conversion
    /// failure aborts the load and is returned.
    pub fn load<S: ConfigSource + ?Sized>(
        resolver: &ClientConfigResolver<'_, S>,
        identity: &ClientIdentity,
    ) -> ConfigResult<Self> {
        Self::build(resolver, identity, Err)
    }

    /// Resolve every field, collecting conversion failures instead of
    /// stopping at the first one. Failed fields are left absent.
    pub fn load_lenient<S: ConfigSource + ?Sized>(
        resolver: &ClientConfigResolver<'_, S>,
        identity: &ClientIdentity,
    ) -> (Self, Vec<ConfigError>) {
        let mut errors = Vec::new();
        let record = Self::build(resolver, identity, |err| {
            errors.push(err);
            Ok(())
        });
        // the collector never fails, so neither does build
        (record.unwrap_or_default(), errors)
    }

    fn build<S, F>(
        resolver: &ClientConfigResolver<'_, S>,
        identity: &ClientIdentity,
        mut on_error: F,
    ) -> ConfigResult<Self>
    where
        S: ConfigSource + ?Sized,
        F: FnMut(ConfigError) -> ConfigResult<()>,
    {
        macro_rules! resolve {
            ($field:expr) => {
                match resolver.resolve(identity, $field.name) {
                    Ok(value) => value,
                    Err(err) => {
                        on_error(err)?;
                        None
                    }
                }
            };
        }

        let record = Self {
            url: resolve!(field::URL),
            uri: resolve!(field::URI),
            scope: resolve!(field::SCOPE),
            providers: resolve!(field::PROVIDERS),
            connect_timeout: resolve!(field::CONNECT_TIMEOUT),
            read_timeout: resolve!(field::READ_TIMEOUT),
            follow_redirects: resolve!(field::FOLLOW_REDIRECTS),
            proxy_address: resolve!(field::PROXY_ADDRESS),
            query_param_style: resolve!(field::QUERY_PARAM_STYLE),
            trust_store: resolve!(field::TRUST_STORE),
            trust_store_password: resolve!(field::TRUST_STORE_PASSWORD),
            trust_store_type: resolve!(field::TRUST_STORE_TYPE),
            key_store: resolve!(field::KEY_STORE),
            key_store_password: resolve!(field::KEY_STORE_PASSWORD),
            key_store_type: resolve!(field::KEY_STORE_TYPE),
            hostname_verifier: resolve!(field::HOSTNAME_VERIFIER),
            connection_ttl: resolve!(field::CONNECTION_TTL),
            connection_pool_size: resolve!(field::CONNECTION_POOL_SIZE),
            max_redirects: resolve!(field::MAX_REDIRECTS),
        };

        tracing::debug!(
            identity = identity.as_str(),
            present = record.present_count(),
            "loaded rest client config"
        );
        Ok(record)
    }

    /// Whether every field is absent.
    pub fn is_empty(&self) -> bool {
        *self == Self::EMPTY
    }

    /// Number of fields with a value.
    pub fn present_count(&self) -> usize {
        [
            self.url.is_some(),
            self.uri.is_some(),
            self.scope.is_some(),
            self.providers.is_some(),
            self.connect_timeout.is_some(),
            self.read_timeout.is_some(),
            self.follow_redirects.is_some(),
            self.proxy_address.is_some(),
            self.query_param_style.is_some(),
            self.trust_store.is_some(),
            self.trust_store_password.is_some(),
            self.trust_store_type.is_some(),
            self.key_store.is_some(),
            self.key_store_password.is_some(),
            self.key_store_type.is_some(),
            self.hostname_verifier.is_some(),
            self.connection_ttl.is_some(),
            self.connection_pool_size.is_some(),
            self.max_redirects.is_some(),
        ]
        .into_iter()
        .filter(|present| *present)
        .count()
    }

    /// Field-wise fallback: keep each present field, otherwise take `other`'s.
    pub fn with_fallback(self, other: &RestClientConfig) -> Self {
        Self {
            url: self.url.or_else(|| other.url.clone()),
            uri: self.uri.or_else(|| other.uri.clone()),
            scope: self.scope.or_else(|| other.scope.clone()),
            providers: self.providers.or_else(|| other.providers.clone()),
            connect_timeout: self.connect_timeout.or(other.connect_timeout),
            read_timeout: self.read_timeout.or(other.read_timeout),
            follow_redirects: self.follow_redirects.or(other.follow_redirects),
            proxy_address: self.proxy_address.or_else(|| other.proxy_address.clone()),
            query_param_style: self.query_param_style.or(other.query_param_style),
            trust_store: self.trust_store.or_else(|| other.trust_store.clone()),
            trust_store_password: self
                .trust_store_password
                .or_else(|| other.trust_store_password.clone()),
            trust_store_type: self.trust_store_type.or_else(|| other.trust_store_type.clone()),
            key_store: self.key_store.or_else(|| other.key_store.clone()),
            key_store_password: self
                .key_store_password
                .or_else(|| other.key_store_password.clone()),
            key_store_type: self.key_store_type.or_else(|| other.key_store_type.clone()),
            hostname_verifier: self
                .hostname_verifier
                .or_else(|| other.hostname_verifier.clone()),
            connection_ttl: self.connection_ttl.or(other.connection_ttl),
            connection_pool_size: self.connection_pool_size.or(other.connection_pool_size),
            max_redirects: self.max_redirects.or(other.max_redirects),
        }
    }

    /// Copy with secret fields replaced by [`REDACTED`].
    pub fn redacted(&self) -> Self {
        let mask = |v: &Option<String>| v.as_ref().map(|_| REDACTED.to_string());
        Self {
            trust_store_password: mask(&self.trust_store_password),
            key_store_password: mask(&self.key_store_password),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcc_config::MapSource;

    #[test]
    fn test_empty_equals_default() {
        assert_eq!(RestClientConfig::EMPTY, RestClientConfig::default());
        assert!(RestClientConfig::EMPTY.is_empty());
        assert_eq!(RestClientConfig::EMPTY.present_count(), 0);
    }

    #[test]
    fn test_load_from_nothing_is_empty() {
        let source = MapSource::new("t");
        let resolver = ClientConfigResolver::new(&source);
        let config = RestClientConfig::load(&resolver, &ClientIdentity::key("nobody")).unwrap();
        assert_eq!(config, RestClientConfig::EMPTY);
    }

    #[test]
    fn test_load_mixed_forms() {
        let source = MapSource::new("t")
            .with("quarkus.rest-client.api.url", "http://x")
            .with("quarkus.rest-client.\"api\".read-timeout", "30000")
            .with("quarkus.rest-client.api.query-param-style", "COMMA_SEPARATED")
            .with("quarkus.rest-client.api.connection-ttl", "0");
        let resolver = ClientConfigResolver::new(&source);
        let config = RestClientConfig::load(&resolver, &ClientIdentity::key("api")).unwrap();

        assert_eq!(config.url.as_deref(), Some("http://x"));
        assert_eq!(config.read_timeout, Some(30000));
        assert_eq!(config.query_param_style, Some(QueryParamStyle::CommaSeparated));
        assert_eq!(config.connection_ttl, Some(0));
        assert_eq!(config.connect_timeout, None);
        assert_eq!(config.present_count(), 4);
    }

    #[test]
    fn test_load_propagates_conversion_error() {
        let source = MapSource::new("t")
            .with("quarkus.rest-client.api.url", "http://x")
            .with("quarkus.rest-client.api.max-redirects", "many");
        let resolver = ClientConfigResolver::new(&source);
        let err = RestClientConfig::load(&resolver, &ClientIdentity::key("api")).unwrap_err();
        assert_eq!(err.key(), Some("quarkus.rest-client.api.max-redirects"));
    }

    #[test]
    fn test_load_lenient_collects_all_errors() {
        let source = MapSource::new("t")
            .with("quarkus.rest-client.api.url", "http://x")
            .with("quarkus.rest-client.api.connect-timeout", "fast")
            .with("quarkus.rest-client.api.max-redirects", "many");
        let resolver = ClientConfigResolver::new(&source);
        let (config, errors) = RestClientConfig::load_lenient(&resolver, &ClientIdentity::key("api"));

        assert_eq!(config.url.as_deref(), Some("http://x"));
        assert_eq!(config.connect_timeout, None);
        let keys: Vec<_> = errors.iter().filter_map(|e| e.key()).collect();
        assert_eq!(
            keys,
            vec![
                "quarkus.rest-client.api.connect-timeout",
                "quarkus.rest-client.api.max-redirects",
            ]
        );
    }

    #[test]
    fn test_with_fallback_keeps_present_fields() {
        let specific = RestClientConfig {
            url: Some("http://specific".to_string()),
            ..RestClientConfig::default()
        };
        let defaults = RestClientConfig {
            url: Some("http://default".to_string()),
            connect_timeout: Some(1000),
            ..RestClientConfig::default()
        };
        let merged = specific.with_fallback(&defaults);
        assert_eq!(merged.url.as_deref(), Some("http://specific"));
        assert_eq!(merged.connect_timeout, Some(1000));
    }

    #[test]
    fn test_redacted_masks_passwords_only() {
        let config = RestClientConfig {
            trust_store: Some("/certs/ts.p12".to_string()),
            trust_store_password: Some("hunter2".to_string()),
            ..RestClientConfig::default()
        };
        let shown = config.redacted();
        assert_eq!(shown.trust_store_password.as_deref(), Some(REDACTED));
        assert_eq!(shown.trust_store.as_deref(), Some("/certs/ts.p12"));
        assert_eq!(shown.key_store_password, None);
    }

    #[test]
    fn test_serialized_names_are_hyphenated() {
        let config = RestClientConfig {
            connect_timeout: Some(5),
            connection_ttl: Some(7),
            ..RestClientConfig::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["connect-timeout"], 5);
        assert_eq!(json["connection-ttl"], 7);
        assert!(json.get("connectTimeout").is_none());
    }
}
