//! The bucket-scoped record interface.

use std::collections::BTreeMap;

use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

/// Record lifecycle operations over named buckets.
///
/// Every operation is synchronous and runs in its own engine transaction.
/// Implementations never log, swallow, or retry errors.
pub trait Backend {
    /// Counts records stored in `bucket`.
    ///
    /// An empty bucket name counts every record in the store.
    fn count(&self, bucket: &str) -> Result<usize>;

    /// Returns whether a record exists under `bucket` and `key`.
    fn exists(&self, bucket: &str, key: &str) -> Result<bool>;

    /// Stores a new record.
    ///
    /// Fails with [`StoreError::AlreadyExists`](crate::StoreError::AlreadyExists)
    /// without writing if the key is taken.
    fn create<T: Serialize + ?Sized>(&self, bucket: &str, key: &str, record: &T) -> Result<()>;

    /// Reads and decodes a record.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) if absent.
    fn read<T: DeserializeOwned>(&self, bucket: &str, key: &str) -> Result<T>;

    /// Overwrites an existing record.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound)
    /// without writing if absent.
    fn update<T: Serialize + ?Sized>(&self, bucket: &str, key: &str, record: &T) -> Result<()>;

    /// Removes an existing record.
    ///
    /// Fails with [`StoreError::NotFound`](crate::StoreError::NotFound) if absent.
    fn delete(&self, bucket: &str, key: &str) -> Result<()>;

    /// Reads every record in `bucket`, keyed by record key.
    fn get_all<T: DeserializeOwned>(&self, bucket: &str) -> Result<BTreeMap<String, T>>;
}
