//! Fuzz target for composite key splitting.
//!
//! Joining the segments of a split key and splitting again yields the
//! same segments.

#![no_main]

use libfuzzer_sys::fuzz_target;
use rcc_config::keys::{join_segments, split_key};

fuzz_target!(|key: &str| {
    let segments = split_key(key);
    let joined = join_segments(&segments);
    assert_eq!(split_key(&joined), segments);
});
