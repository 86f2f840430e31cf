//! Physical key encoding.
//!
//! Buckets are emulated by prefixing every record key with its bucket name:
//!
//! Key format: {bucket:var}_{key:var}
//!
//! Bucket names never contain `_` (enforced by
//! [`validate_bucket`](kvbase_types::validate_bucket)), so the first `_`
//! always terminates the bucket and the encoding is injective. The layout is
//! byte-compatible with stores written by earlier bucket-prefixed backends.

use kvbase_types::KEY_DELIMITER;

/// Decoded physical key components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKey {
    /// Bucket name.
    pub bucket: String,
    /// Record key within the bucket.
    pub key: String,
}

/// Encodes a physical key from a bucket name and record key.
pub fn encode_storage_key(bucket: &str, key: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(bucket.len() + 1 + key.len());
    out.extend_from_slice(bucket.as_bytes());
    out.push(KEY_DELIMITER);
    out.extend_from_slice(key.as_bytes());
    out
}

/// Creates the prefix shared by every physical key in a bucket.
pub fn bucket_prefix(bucket: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(bucket.len() + 1);
    out.extend_from_slice(bucket.as_bytes());
    out.push(KEY_DELIMITER);
    out
}

/// Strips a bucket prefix, returning the record key bytes.
///
/// Returns None if `physical` does not start with `prefix`.
pub fn local_key<'a>(physical: &'a [u8], prefix: &[u8]) -> Option<&'a [u8]> {
    physical.strip_prefix(prefix)
}

/// Decodes a physical key into its components.
///
/// Splits at the first delimiter. Returns None if there is no delimiter,
/// either side is empty, or either side is not UTF-8.
pub fn decode_storage_key(physical: &[u8]) -> Option<StorageKey> {
    let split = physical.iter().position(|&b| b == KEY_DELIMITER)?;
    let (bucket, rest) = physical.split_at(split);
    let key = &rest[1..];
    if bucket.is_empty() || key.is_empty() {
        return None;
    }

    Some(StorageKey {
        bucket: std::str::from_utf8(bucket).ok()?.to_string(),
        key: std::str::from_utf8(key).ok()?.to_string(),
    })
}
