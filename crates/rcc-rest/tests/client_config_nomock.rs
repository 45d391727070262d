//! No-mock client configuration tests.
//!
//! Covers:
//! - Resolution scenarios for key and type identities
//! - Records loaded from real YAML and TOML files
//! - Environment variables layered over files
//! - Lenient loading, validation and client discovery on a full stack

use rcc_config::{EnvSource, FileSource, LayeredConfig, MapSource};
use rcc_rest::{
    configured_clients, ClientConfigResolver, ClientIdentity, QueryParamStyle, RestClientConfig,
    Severity, DEFAULT_PREFIX,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const YAML: &str = r#"
quarkus:
  rest-client:
    "com.acme.Client":
      url: http://fq.example
      read-timeout: 2000
    Client:
      url: http://short.example
      connect-timeout: 500
    billing:
      uri: https://billing.example/api
      follow-redirects: on
      max-redirects: 3
      query-param-style: array-pairs
      trust-store: /certs/billing.p12
      trust-store-password: changeit
"#;

const TOML: &str = r#"
[quarkus.rest-client.billing]
uri = "https://billing.example/api"
connection-pool-size = 0
proxy-address = "proxy.local"

[quarkus.rest-client.broken]
url = "http://broken.example"
connect-timeout = "soon"
read-timeout = "later"
"#;

fn write_file(temp: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp.path().join(name);
    fs::write(&path, content).expect("write config file");
    path
}

fn env_from(pairs: &[(&str, &str)]) -> EnvSource {
    let map: BTreeMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvSource::with_lookup(move |key| map.get(key).cloned())
}

#[test]
fn test_quoted_key_scenario() {
    let source = MapSource::new("t").with("quarkus.rest-client.\"my-client\".connect-timeout", "5000");
    let resolver = ClientConfigResolver::new(&source);
    let timeout: Option<i64> = resolver
        .resolve(&ClientIdentity::key("my-client"), "connect-timeout")
        .expect("resolves");
    assert_eq!(timeout, Some(5000));
}

#[test]
fn test_short_name_scenario() {
    let source = MapSource::new("t").with("quarkus.rest-client.Client.url", "http://x");
    let resolver = ClientConfigResolver::new(&source);
    let url: Option<String> = resolver
        .resolve(&ClientIdentity::for_type_name("com.acme.Client"), "url")
        .expect("resolves");
    assert_eq!(url.as_deref(), Some("http://x"));
}

#[test]
fn test_boolean_coercion_failure_scenario() {
    let source = MapSource::new("t").with("quarkus.rest-client.api.follow-redirects", "notabool");
    let resolver = ClientConfigResolver::new(&source);
    let err = resolver
        .resolve::<bool>(&ClientIdentity::key("api"), "follow-redirects")
        .expect_err("coercion must fail");
    assert!(err.is_conversion());
    assert!(err.to_string().contains("quarkus.rest-client.api.follow-redirects"));
}

#[test]
fn test_type_identity_from_yaml_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_file(&temp, "application.yaml", YAML);
    let file = FileSource::load(&path).expect("load yaml");
    let resolver = ClientConfigResolver::new(&file);

    let config = RestClientConfig::load(&resolver, &ClientIdentity::for_type_name("com.acme.Client"))
        .expect("load record");

    // Fully qualified form wins per field; missing fields fall to the short name.
    assert_eq!(config.url.as_deref(), Some("http://fq.example"));
    assert_eq!(config.read_timeout, Some(2000));
    assert_eq!(config.connect_timeout, Some(500));
}

#[test]
fn test_key_identity_from_yaml_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_file(&temp, "application.yml", YAML);
    let file = FileSource::load(&path).expect("load yaml");
    let resolver = ClientConfigResolver::new(&file);

    let config = RestClientConfig::load(&resolver, &ClientIdentity::key("billing")).expect("load record");
    assert_eq!(config.uri.as_deref(), Some("https://billing.example/api"));
    assert_eq!(config.follow_redirects, Some(true));
    assert_eq!(config.max_redirects, Some(3));
    assert_eq!(config.query_param_style, Some(QueryParamStyle::ArrayPairs));
    assert!(config.validate().is_empty());

    let shown = serde_json::to_value(config.redacted()).expect("serialize");
    assert_eq!(shown["trust-store-password"], "****");
}

#[test]
fn test_environment_overrides_file() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_file(&temp, "application.yaml", YAML);
    let layered = LayeredConfig::new()
        .with_source(FileSource::load(&path).expect("load yaml"))
        .with_source(env_from(&[
            ("QUARKUS_REST_CLIENT_BILLING_MAX_REDIRECTS", "7"),
            ("QUARKUS_REST_CLIENT_BILLING_URL", "http://env.example"),
        ]));
    let resolver = ClientConfigResolver::new(&layered);

    let config = RestClientConfig::load(&resolver, &ClientIdentity::key("billing")).expect("load record");
    assert_eq!(config.max_redirects, Some(7));
    assert_eq!(config.url.as_deref(), Some("http://env.example"));
    assert_eq!(config.uri.as_deref(), Some("https://billing.example/api"));
}

#[test]
fn test_lenient_load_and_validation_on_toml() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_file(&temp, "application.toml", TOML);
    let file = FileSource::load(&path).expect("load toml");
    let resolver = ClientConfigResolver::new(&file);

    let (broken, errors) = RestClientConfig::load_lenient(&resolver, &ClientIdentity::key("broken"));
    assert_eq!(broken.url.as_deref(), Some("http://broken.example"));
    assert_eq!(errors.len(), 2);
    assert!(RestClientConfig::load(&resolver, &ClientIdentity::key("broken")).is_err());

    let billing = RestClientConfig::load(&resolver, &ClientIdentity::key("billing")).expect("load record");
    let issues = billing.validate();
    let fields: Vec<_> = issues.iter().map(|i| i.field).collect();
    assert_eq!(fields, vec!["connection-pool-size", "proxy-address"]);
    assert!(issues.iter().all(|i| i.severity == Severity::Error));
}

#[test]
fn test_configured_clients_across_layers() {
    let temp = TempDir::new().expect("temp dir");
    let path = write_file(&temp, "application.yaml", YAML);
    let layered = LayeredConfig::new()
        .with_source(FileSource::load(&path).expect("load yaml"))
        .with_source(MapSource::new("overrides").with("quarkus.rest-client.extra.url", "http://extra"));

    assert_eq!(
        configured_clients(&layered, DEFAULT_PREFIX),
        vec!["Client", "billing", "com.acme.Client", "extra"]
    );
}

#[test]
fn test_nothing_configured_yields_empty_record() {
    let layered = LayeredConfig::new().with_source(env_from(&[]));
    let resolver = ClientConfigResolver::new(&layered);
    let config = RestClientConfig::load(&resolver, &ClientIdentity::of::<LayeredConfig>()).expect("load record");
    assert_eq!(config, RestClientConfig::EMPTY);
}
