//! Enumerate client names present in a source.

use std::collections::BTreeSet;

use rcc_config::keys::split_key;
use rcc_config::ConfigSource;

use crate::field::field;

/// Names of every client with at least one known field under `prefix`.
///
/// Only sources that enumerate their keys contribute; environment variables
/// are never listed. Quoted names are returned without their quotes, so
/// `a` and `"a"` report once.
pub fn configured_clients<S: ConfigSource + ?Sized>(source: &S, prefix: &str) -> Vec<String> {
    let names: BTreeSet<String> = source
        .keys()
        .iter()
        .filter_map(|key| key.strip_prefix(prefix))
        .filter_map(|rest| {
            let mut segments = split_key(rest);
            if segments.len() != 2 || field(&segments[1]).is_none() || segments[0].is_empty() {
                return None;
            }
            Some(segments.swap_remove(0))
        })
        .collect();

    tracing::debug!(prefix, count = names.len(), "discovered configured clients");
    names.into_iter().collect()
}
