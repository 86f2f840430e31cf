//! Fuzz target for physical storage key decoding.
//!
//! Tests that `decode_storage_key` never panics on arbitrary input, and that
//! every successfully decoded key re-encodes to the exact input bytes.

#![no_main]

use libfuzzer_sys::fuzz_target;

use kvbase_store::keys::{bucket_prefix, decode_storage_key, encode_storage_key, local_key};

fuzz_target!(|data: &[u8]| {
    let Some(decoded) = decode_storage_key(data) else {
        return;
    };

    assert!(!decoded.bucket.is_empty(), "decoded bucket must be non-empty");
    assert!(!decoded.key.is_empty(), "decoded key must be non-empty");
    assert!(!decoded.bucket.contains('_'), "decoded bucket must not contain the delimiter");

    let encoded = encode_storage_key(&decoded.bucket, &decoded.key);
    assert_eq!(encoded, data, "storage key roundtrip mismatch");

    let prefix = bucket_prefix(&decoded.bucket);
    assert!(data.starts_with(&prefix), "physical key must start with its bucket prefix");
    assert_eq!(
        local_key(data, &prefix),
        Some(decoded.key.as_bytes()),
        "local key must strip exactly the bucket prefix"
    );
});
