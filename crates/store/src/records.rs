//! Record table operations.
//!
//! Stateless operations on an already-open records table, usable from both
//! read and write transactions. Callers own transaction scope; these
//! functions only compose physical keys, touch the table, and run the codec.

use std::collections::BTreeMap;

use kvbase_types::Codec;
use redb::{ReadableTable, Table};
use serde::de::DeserializeOwned;
use snafu::ResultExt;

use crate::error::{CodecSnafu, InvalidStorageKeySnafu, Result, StorageSnafu};
use crate::keys::{bucket_prefix, encode_storage_key, local_key};

/// Record storage operations.
pub struct RecordStore;

impl RecordStore {
    /// Get the stored bytes for a record, if present.
    pub fn get_raw(
        table: &impl ReadableTable<&'static [u8], &'static [u8]>,
        bucket: &str,
        key: &str,
    ) -> Result<Option<Vec<u8>>> {
        let storage_key = encode_storage_key(bucket, key);
        let value = table.get(&storage_key[..]).context(StorageSnafu)?;
        Ok(value.map(|guard| guard.value().to_vec()))
    }

    /// Get and decode a record, if present.
    pub fn get<T: DeserializeOwned>(
        table: &impl ReadableTable<&'static [u8], &'static [u8]>,
        codec: &impl Codec,
        bucket: &str,
        key: &str,
    ) -> Result<Option<T>> {
        let storage_key = encode_storage_key(bucket, key);
        match table.get(&storage_key[..]).context(StorageSnafu)? {
            Some(data) => Ok(Some(codec.decode(data.value()).context(CodecSnafu)?)),
            None => Ok(None),
        }
    }

    /// Check if a record exists.
    pub fn exists(
        table: &impl ReadableTable<&'static [u8], &'static [u8]>,
        bucket: &str,
        key: &str,
    ) -> Result<bool> {
        let storage_key = encode_storage_key(bucket, key);
        Ok(table.get(&storage_key[..]).context(StorageSnafu)?.is_some())
    }

    /// Store already-encoded record bytes, overwriting any previous value.
    pub fn set(
        table: &mut Table<'_, &'static [u8], &'static [u8]>,
        bucket: &str,
        key: &str,
        encoded: &[u8],
    ) -> Result<()> {
        let storage_key = encode_storage_key(bucket, key);
        table.insert(&storage_key[..], encoded).context(StorageSnafu)?;
        Ok(())
    }

    /// Delete a record. Returns whether it existed.
    pub fn delete(
        table: &mut Table<'_, &'static [u8], &'static [u8]>,
        bucket: &str,
        key: &str,
    ) -> Result<bool> {
        let storage_key = encode_storage_key(bucket, key);
        let existed = table.remove(&storage_key[..]).context(StorageSnafu)?;
        Ok(existed.is_some())
    }

    /// Count records in a bucket without reading values.
    ///
    /// An empty bucket name counts every record in the table.
    pub fn count(
        table: &impl ReadableTable<&'static [u8], &'static [u8]>,
        bucket: &str,
    ) -> Result<usize> {
        let mut count = 0;

        if bucket.is_empty() {
            for result in table.iter().context(StorageSnafu)? {
                result.context(StorageSnafu)?;
                count += 1;
            }
            return Ok(count);
        }

        let prefix = bucket_prefix(bucket);
        for result in table.range(&prefix[..]..).context(StorageSnafu)? {
            let (key, _) = result.context(StorageSnafu)?;
            if !key.value().starts_with(&prefix) {
                break;
            }
            count += 1;
        }

        Ok(count)
    }

    /// List and decode every record in a bucket, keyed by record key.
    ///
    /// Each value is decoded into a fresh `T`. The first decode failure
    /// aborts the scan and no partial result is returned.
    pub fn list_in_bucket<T: DeserializeOwned>(
        table: &impl ReadableTable<&'static [u8], &'static [u8]>,
        codec: &impl Codec,
        bucket: &str,
    ) -> Result<BTreeMap<String, T>> {
        let prefix = bucket_prefix(bucket);
        let mut records = BTreeMap::new();

        for result in table.range(&prefix[..]..).context(StorageSnafu)? {
            let (key, value) = result.context(StorageSnafu)?;
            let key_bytes = key.value();

            // Keys are sorted, so the first miss ends the bucket
            let Some(local) = local_key(key_bytes, &prefix) else {
                break;
            };
            let Ok(local) = std::str::from_utf8(local) else {
                return InvalidStorageKeySnafu { key: String::from_utf8_lossy(key_bytes) }.fail();
            };

            let record = codec.decode(value.value()).context(CodecSnafu)?;
            records.insert(local.to_string(), record);
        }

        Ok(records)
    }
}
