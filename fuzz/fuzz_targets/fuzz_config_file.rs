//! Fuzz target for application config file parsing.
//!
//! Every supported format must reject malformed input with an error,
//! never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rcc_config::file::{parse_content, FileFormat};

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    for format in [FileFormat::Properties, FileFormat::Toml, FileFormat::Yaml, FileFormat::Json] {
        let _ = parse_content(format, content);
    }
});
