//! Bucket-namespaced record store.
//!
//! [`BucketStore`] owns the engine handle and a codec, and implements
//! [`Backend`] by composing `{bucket}_{key}` physical keys over the single
//! records table.
//!
//! Existence checks for create, update and delete run inside the same write
//! transaction as the mutation. redb admits one writer at a time, so two
//! concurrent creates of the same key are serialized and the second one sees
//! the first one's record and fails with `AlreadyExists`.

use std::collections::BTreeMap;

use kvbase_types::{
    Codec, CodecFormat, StoreConfig, ValidationConfig, validate_bucket, validate_key,
};
use redb::Table;
use serde::{Serialize, de::DeserializeOwned};
use snafu::ResultExt;
use tracing::{debug, instrument, trace};

use crate::backend::Backend;
use crate::engine::StorageEngine;
use crate::error::{
    AlreadyExistsSnafu, CodecSnafu, CommitSnafu, ConfigSnafu, InvalidNameSnafu, NotFoundSnafu,
    Result, StorageSnafu, TableSnafu,
};
use crate::records::RecordStore;
use crate::tables::Tables;

/// Record store over named buckets.
///
/// Create once at startup and share by reference or clone; clones share the
/// same database. Decoded records are never cached between calls.
#[derive(Clone)]
pub struct BucketStore<C = CodecFormat> {
    engine: StorageEngine,
    codec: C,
    validation: ValidationConfig,
}

#[allow(clippy::result_large_err)]
impl BucketStore<CodecFormat> {
    /// Opens (or creates) the store described by `config`.
    ///
    /// The database file lives at [`StoreConfig::database_file`]; its
    /// directory is created if missing.
    pub fn open(config: &StoreConfig) -> Result<Self> {
        config.validate().context(ConfigSnafu)?;
        let engine = StorageEngine::open(config.database_file(), config.cache_size_bytes)?;
        debug!(path = %config.path.display(), codec = %config.codec, "Opened bucket store");

        Ok(Self::with_codec(engine, config.codec).with_validation(config.validation.clone()))
    }

    /// Opens an in-memory store with default codec and limits.
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::with_codec(StorageEngine::open_in_memory()?, CodecFormat::default()))
    }
}

#[allow(clippy::result_large_err)]
impl<C: Codec> BucketStore<C> {
    /// Creates a store over an existing engine with the given codec.
    pub fn with_codec(engine: StorageEngine, codec: C) -> Self {
        Self { engine, codec, validation: ValidationConfig::default() }
    }

    /// Replaces the bucket name and key limits.
    #[must_use]
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    /// The underlying storage engine.
    pub fn engine(&self) -> &StorageEngine {
        &self.engine
    }

    /// The record codec.
    pub fn codec(&self) -> &C {
        &self.codec
    }

    fn check_bucket(&self, bucket: &str) -> Result<()> {
        validate_bucket(bucket, &self.validation).context(InvalidNameSnafu)
    }

    fn check_names(&self, bucket: &str, key: &str) -> Result<()> {
        self.check_bucket(bucket)?;
        validate_key(key, &self.validation).context(InvalidNameSnafu)
    }

    /// Encodes `record` and stores it, returning the encoded size.
    ///
    /// Runs after the existence check so that existence errors take
    /// precedence over codec errors.
    fn encode_into<T: Serialize + ?Sized>(
        &self,
        table: &mut Table<'_, &'static [u8], &'static [u8]>,
        bucket: &str,
        key: &str,
        record: &T,
    ) -> Result<usize> {
        let encoded = self.codec.encode(record).context(CodecSnafu)?;
        RecordStore::set(table, bucket, key, &encoded)?;
        Ok(encoded.len())
    }
}

#[allow(clippy::result_large_err)]
impl<C: Codec> Backend for BucketStore<C> {
    #[instrument(level = "debug", skip(self))]
    fn count(&self, bucket: &str) -> Result<usize> {
        if !bucket.is_empty() {
            self.check_bucket(bucket)?;
        }

        let txn = self.engine.begin_read()?;
        let table = txn.open_table(Tables::RECORDS).context(TableSnafu)?;
        RecordStore::count(&table, bucket)
    }

    #[instrument(level = "debug", skip(self))]
    fn exists(&self, bucket: &str, key: &str) -> Result<bool> {
        self.check_names(bucket, key)?;

        let txn = self.engine.begin_read()?;
        let table = txn.open_table(Tables::RECORDS).context(TableSnafu)?;
        RecordStore::exists(&table, bucket, key)
    }

    #[instrument(level = "debug", skip(self, record))]
    fn create<T: Serialize + ?Sized>(&self, bucket: &str, key: &str, record: &T) -> Result<()> {
        self.check_names(bucket, key)?;

        let txn = self.engine.begin_write()?;
        let written = {
            let mut table = txn.open_table(Tables::RECORDS).context(TableSnafu)?;
            if RecordStore::exists(&table, bucket, key)? {
                AlreadyExistsSnafu { bucket, key }.fail()
            } else {
                self.encode_into(&mut table, bucket, key, record)
            }
        };

        let bytes = match written {
            Ok(bytes) => bytes,
            Err(err) => {
                txn.abort().context(StorageSnafu)?;
                return Err(err);
            },
        };

        txn.commit().context(CommitSnafu)?;
        trace!(bytes, "Created record");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn read<T: DeserializeOwned>(&self, bucket: &str, key: &str) -> Result<T> {
        self.check_names(bucket, key)?;

        let txn = self.engine.begin_read()?;
        let table = txn.open_table(Tables::RECORDS).context(TableSnafu)?;
        match RecordStore::get(&table, &self.codec, bucket, key)? {
            Some(record) => Ok(record),
            None => NotFoundSnafu { bucket, key }.fail(),
        }
    }

    #[instrument(level = "debug", skip(self, record))]
    fn update<T: Serialize + ?Sized>(&self, bucket: &str, key: &str, record: &T) -> Result<()> {
        self.check_names(bucket, key)?;

        let txn = self.engine.begin_write()?;
        let written = {
            let mut table = txn.open_table(Tables::RECORDS).context(TableSnafu)?;
            if RecordStore::exists(&table, bucket, key)? {
                self.encode_into(&mut table, bucket, key, record)
            } else {
                NotFoundSnafu { bucket, key }.fail()
            }
        };

        let bytes = match written {
            Ok(bytes) => bytes,
            Err(err) => {
                txn.abort().context(StorageSnafu)?;
                return Err(err);
            },
        };

        txn.commit().context(CommitSnafu)?;
        trace!(bytes, "Updated record");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        self.check_names(bucket, key)?;

        let txn = self.engine.begin_write()?;
        let existed = {
            let mut table = txn.open_table(Tables::RECORDS).context(TableSnafu)?;
            RecordStore::delete(&mut table, bucket, key)?
        };

        if !existed {
            txn.abort().context(StorageSnafu)?;
            return NotFoundSnafu { bucket, key }.fail();
        }

        txn.commit().context(CommitSnafu)?;
        trace!("Deleted record");
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    fn get_all<T: DeserializeOwned>(&self, bucket: &str) -> Result<BTreeMap<String, T>> {
        self.check_bucket(bucket)?;

        let txn = self.engine.begin_read()?;
        let table = txn.open_table(Tables::RECORDS).context(TableSnafu)?;
        let records = RecordStore::list_in_bucket(&table, &self.codec, bucket)?;
        trace!(count = records.len(), "Listed bucket");
        Ok(records)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use kvbase_types::{ErrorCode, JsonCodec, PostcardCodec};
    use serde::Deserialize;

    use super::*;
    use crate::StoreError;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct User {
        name: String,
    }

    fn user(name: &str) -> User {
        User { name: name.to_string() }
    }

    fn store() -> BucketStore {
        BucketStore::open_in_memory().expect("open store")
    }

    #[test]
    fn test_user_lifecycle_scenario() {
        let store = store();

        store.create("users", "1", &user("Ann")).expect("create");
        assert_eq!(store.read::<User>("users", "1").expect("read"), user("Ann"));

        let err = store.create("users", "1", &user("Bob")).unwrap_err();
        assert!(err.is_already_exists(), "{err}");

        store.update("users", "1", &user("Carl")).expect("update");
        assert_eq!(store.read::<User>("users", "1").expect("read"), user("Carl"));

        store.delete("users", "1").expect("delete");
        let err = store.read::<User>("users", "1").unwrap_err();
        assert!(err.is_not_found(), "{err}");

        assert_eq!(store.count("users").expect("count"), 0);
    }

    #[test]
    fn test_duplicate_create_keeps_first_record() {
        let store = store();
        store.create("users", "1", &user("Ann")).expect("create");
        assert!(store.create("users", "1", &user("Bob")).is_err());

        assert_eq!(store.read::<User>("users", "1").expect("read"), user("Ann"));
        assert_eq!(store.count("users").expect("count"), 1);
    }

    #[test]
    fn test_update_missing_does_not_write() {
        let store = store();
        let err = store.update("users", "ghost", &user("Nobody")).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { ref bucket, ref key }
            if bucket == "users" && key == "ghost"));

        assert!(!store.exists("users", "ghost").expect("exists"));
        assert_eq!(store.count("users").expect("count"), 0);
    }

    /// A record shape JSON cannot encode: map keys must be strings.
    fn unencodable() -> BTreeMap<(u8, u8), u8> {
        BTreeMap::from([((1, 2), 3)])
    }

    #[test]
    fn test_update_missing_reports_not_found_before_encoding() {
        let store = store();
        let err = store.update("users", "ghost", &unencodable()).unwrap_err();
        assert!(err.is_not_found(), "{err}");
        assert!(!store.exists("users", "ghost").expect("exists"));
    }

    #[test]
    fn test_create_existing_reports_already_exists_before_encoding() {
        let store = store();
        store.create("users", "1", &1u8).expect("create");

        let err = store.create("users", "1", &unencodable()).unwrap_err();
        assert!(err.is_already_exists(), "{err}");
        assert_eq!(store.read::<u8>("users", "1").expect("read"), 1);
    }

    #[test]
    fn test_encode_failure_after_existence_check_writes_nothing() {
        let store = store();
        let err = store.create("users", "1", &unencodable()).unwrap_err();
        assert!(matches!(err, StoreError::Codec { .. }), "{err}");
        assert!(!store.exists("users", "1").expect("exists"));

        store.create("users", "2", &1u8).expect("create");
        let err = store.update("users", "2", &unencodable()).unwrap_err();
        assert!(matches!(err, StoreError::Codec { .. }), "{err}");
        assert_eq!(store.read::<u8>("users", "2").expect("read"), 1);

        // The aborted transactions leave the store writable
        store.create("users", "3", &3u8).expect("create after abort");
    }

    #[test]
    fn test_delete_missing() {
        let store = store();
        let err = store.delete("users", "ghost").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.code(), ErrorCode::AppRecordNotFound);
    }

    #[test]
    fn test_count_and_get_all() {
        let store = store();
        for (key, name) in [("1", "Ann"), ("2", "Bob"), ("3", "Carl")] {
            store.create("users", key, &user(name)).expect("create");
        }
        store.create("groups", "admins", &user("root")).expect("create");

        assert_eq!(store.count("users").expect("count"), 3);
        assert_eq!(store.count("groups").expect("count"), 1);
        assert_eq!(store.count("").expect("count all"), 4);

        let all: BTreeMap<String, User> = store.get_all("users").expect("get all");
        assert_eq!(all.keys().cloned().collect::<Vec<_>>(), vec!["1", "2", "3"]);
        assert_eq!(all["2"], user("Bob"));
    }

    #[test]
    fn test_get_all_uses_fresh_decode_target() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Partial {
            #[serde(default)]
            a: Option<u32>,
            #[serde(default)]
            b: Option<u32>,
        }

        let store = store();
        store.create("mix", "1", &serde_json::json!({ "a": 1 })).expect("create");
        store.create("mix", "2", &serde_json::json!({ "b": 2 })).expect("create");

        let all: BTreeMap<String, Partial> = store.get_all("mix").expect("get all");
        assert_eq!(all["1"], Partial { a: Some(1), b: None });
        assert_eq!(all["2"], Partial { a: None, b: Some(2) });
    }

    #[test]
    fn test_get_all_empty_bucket() {
        let store = store();
        let all: BTreeMap<String, User> = store.get_all("users").expect("get all");
        assert!(all.is_empty());
    }

    #[test]
    fn test_get_all_decode_failure_returns_error() {
        let store = store();
        store.create("users", "1", &user("Ann")).expect("create");
        store.create("users", "2", &42u32).expect("create");

        let result: Result<BTreeMap<String, User>> = store.get_all("users");
        let err = result.unwrap_err();
        assert!(matches!(err, StoreError::Codec { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_read_decode_failure_is_distinct() {
        let store = store();
        store.create("users", "1", &"not a user").expect("create");

        let err = store.read::<User>("users", "1").unwrap_err();
        assert!(matches!(err, StoreError::Codec { ref source } if source.is_decode()));
    }

    #[test]
    fn test_physical_layout() {
        let store = store();
        store.create("users", "1", &user("Ann")).expect("create");

        let txn = store.engine().begin_read().expect("begin read");
        let table = txn.open_table(Tables::RECORDS).expect("open table");
        let raw = RecordStore::get_raw(&table, "users", "1").expect("get raw");
        assert_eq!(raw, Some(br#"{"name":"Ann"}"#.to_vec()));
    }

    #[test]
    fn test_invalid_names_rejected() {
        let store = store();

        let err = store.create("user_s", "1", &user("Ann")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidName { .. }));
        assert!(store.create("", "1", &user("Ann")).is_err());
        assert!(store.create("users", "", &user("Ann")).is_err());
        assert!(store.get_all::<User>("").is_err());
        assert!(store.count("user_s").is_err());
    }

    #[test]
    fn test_custom_validation_limits() {
        let limits = ValidationConfig::builder().max_key_bytes(2).build().expect("limits");
        let store = store().with_validation(limits);

        store.create("users", "12", &user("Ann")).expect("create");
        let err = store.create("users", "123", &user("Bob")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::AppInvalidArgument);
    }

    #[test]
    fn test_keys_may_contain_delimiter() {
        let store = store();
        store.create("users", "a_b", &user("Ann")).expect("create");
        store.create("users", "a", &user("Bob")).expect("create");

        let all: BTreeMap<String, User> = store.get_all("users").expect("get all");
        assert_eq!(all["a_b"], user("Ann"));
        assert_eq!(all["a"], user("Bob"));
    }

    #[test]
    fn test_postcard_codec() {
        let engine = StorageEngine::open_in_memory().expect("open engine");
        let store = BucketStore::with_codec(engine, PostcardCodec);

        store.create("users", "1", &user("Ann")).expect("create");
        assert_eq!(store.read::<User>("users", "1").expect("read"), user("Ann"));
        assert_eq!(*store.codec(), PostcardCodec);
    }

    #[test]
    fn test_static_json_codec() {
        let engine = StorageEngine::open_in_memory().expect("open engine");
        let store = BucketStore::with_codec(engine, JsonCodec);
        store.create("users", "1", &user("Ann")).expect("create");
        assert_eq!(store.read::<serde_json::Value>("users", "1").expect("read")["name"], "Ann");
    }

    #[test]
    fn test_concurrent_creates_single_winner() {
        let store = store();

        let results: Vec<Result<()>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let store = &store;
                    s.spawn(move || store.create("users", "1", &user(&format!("writer-{i}"))))
                })
                .collect();
            handles.into_iter().map(|h| h.join().expect("writer thread")).collect()
        });

        let winners = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(winners, 1);
        assert!(results.iter().filter_map(|r| r.as_ref().err()).all(StoreError::is_already_exists));
        assert_eq!(store.count("users").expect("count"), 1);
    }

    #[test]
    fn test_clone_shares_records() {
        let store = store();
        let clone = store.clone();
        store.create("users", "1", &user("Ann")).expect("create");
        assert!(clone.exists("users", "1").expect("exists"));
    }
}
