//! Property-based tests for client config resolution order.

use proptest::prelude::*;
use rcc_config::MapSource;
use rcc_rest::{ClientConfigResolver, ClientIdentity, RestClientConfig, FIELDS};

fn client_key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,12}"
}

fn type_name() -> impl Strategy<Value = String> {
    "[a-z]{1,5}(\\.[a-z]{1,5}){0,3}\\.[A-Z][a-zA-Z]{0,8}"
}

fn value() -> impl Strategy<Value = String> {
    "[a-z0-9:/]{1,20}"
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// A key identity finds a value stored only under the quoted form.
    #[test]
    fn quoted_form_is_found(key in client_key(), url in value()) {
        let source = MapSource::new("t")
            .with(format!("quarkus.rest-client.\"{}\".url", key), url.clone());
        let resolver = ClientConfigResolver::new(&source);
        let got: Option<String> = resolver.resolve(&ClientIdentity::key(key), "url").unwrap();
        prop_assert_eq!(got, Some(url));
    }

    /// When both forms are present the unquoted one wins.
    #[test]
    fn unquoted_form_wins(key in client_key(), plain in value(), quoted in value()) {
        let source = MapSource::new("t")
            .with(format!("quarkus.rest-client.{}.url", key), plain.clone())
            .with(format!("quarkus.rest-client.\"{}\".url", key), quoted);
        let resolver = ClientConfigResolver::new(&source);
        let got: Option<String> = resolver.resolve(&ClientIdentity::key(key), "url").unwrap();
        prop_assert_eq!(got, Some(plain));
    }

    /// For a type identity the first present of the three forms wins,
    /// whichever subset of them is configured.
    #[test]
    fn type_forms_probe_in_order(name in type_name(), mask in 0u8..8) {
        let identity = ClientIdentity::for_type_name(name.clone());
        let simple = name.rsplit('.').next().unwrap_or(&name).to_string();
        let forms = [
            format!("quarkus.rest-client.\"{}\".uri", name),
            format!("quarkus.rest-client.{}.uri", simple),
            format!("quarkus.rest-client.\"{}\".uri", simple),
        ];

        let mut source = MapSource::new("t");
        for (i, key) in forms.iter().enumerate() {
            if mask & (1 << i) != 0 {
                source.insert(key.clone(), format!("form-{}", i));
            }
        }

        let resolver = ClientConfigResolver::new(&source);
        let got = resolver.resolve_with_key::<String>(&identity, "uri").unwrap();
        let expected = (0..3).find(|i| mask & (1 << i) != 0);
        match expected {
            Some(i) => {
                let probe = got.unwrap();
                prop_assert_eq!(probe.value, format!("form-{}", i));
                prop_assert_eq!(&probe.key, &forms[i]);
            }
            None => prop_assert!(got.is_none()),
        }
    }

    /// Loading is a pure function of the source contents.
    #[test]
    fn load_is_repeatable(key in client_key(), url in value(), timeout in 0i64..1_000_000) {
        let source = MapSource::new("t")
            .with(format!("quarkus.rest-client.{}.url", key), url)
            .with(format!("quarkus.rest-client.\"{}\".connect-timeout", key), timeout.to_string());
        let resolver = ClientConfigResolver::new(&source);
        let identity = ClientIdentity::key(key);
        let first = RestClientConfig::load(&resolver, &identity).unwrap();
        let second = RestClientConfig::load(&resolver, &identity).unwrap();
        prop_assert_eq!(first.connect_timeout, Some(timeout));
        prop_assert_eq!(first, second);
    }

    /// Settings for one client never leak into another.
    #[test]
    fn clients_are_isolated(a in client_key(), b in client_key(), url in value()) {
        prop_assume!(a != b);
        let mut source = MapSource::new("t");
        for field in FIELDS.iter().filter(|f| f.kind == rcc_rest::FieldKind::String) {
            source.insert(format!("quarkus.rest-client.{}.{}", a, field.name), url.clone());
        }
        let resolver = ClientConfigResolver::new(&source);
        let other = RestClientConfig::load(&resolver, &ClientIdentity::key(b)).unwrap();
        prop_assert!(other.is_empty());
    }
}
