//! Fuzz target for client record loading from `.properties` input.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rcc_config::file::parse_properties;
use rcc_config::MapSource;
use rcc_rest::{ClientConfigResolver, ClientIdentity, RestClientConfig};

fuzz_target!(|data: &str| {
    let mut source = MapSource::new("fuzz");
    for (key, value) in parse_properties(data) {
        source.insert(key, value);
    }
    let resolver = ClientConfigResolver::new(&source);
    for identity in [ClientIdentity::key("api"), ClientIdentity::for_type_name("com.acme.Api")] {
        let (config, _errors) = RestClientConfig::load_lenient(&resolver, &identity);
        let _ = config.validate();
    }
});
