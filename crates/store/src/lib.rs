//! kvbase-store: bucket-namespaced record storage over redb.
//!
//! Buckets are named collections of records emulated on a flat, ordered key
//! space by prefixing every record key with its bucket name. Records are any
//! serde type, stored through a swappable [`Codec`](kvbase_types::Codec).
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │           Backend / BucketStore             │
//! │ (count, create, read, update, delete, all)  │
//! └────────────────┬────────────────────────────┘
//!                  │
//! ┌────────────────▼────────────────────────────┐
//! │          RecordStore + keys                 │
//! │   ({bucket}_{key} keys, prefix scans)       │
//! └────────────────┬────────────────────────────┘
//!                  │
//! ┌────────────────▼────────────────────────────┐
//! │             StorageEngine                   │
//! │     (redb: file or in-memory backend)       │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use kvbase_store::{Backend, BucketStore};
//! use kvbase_types::StoreConfig;
//!
//! let store = BucketStore::open(&StoreConfig::default())?;
//!
//! store.create("users", "1", &"Ann")?;
//! let name: String = store.read("users", "1")?;
//! assert_eq!(name, "Ann");
//! assert_eq!(store.count("users")?, 1);
//! # Ok::<(), kvbase_store::StoreError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod bucket_store;
mod engine;
mod error;
pub mod keys;
mod records;
mod tables;

pub use backend::Backend;
pub use bucket_store::BucketStore;
pub use engine::StorageEngine;
pub use error::{Result, StoreError};
pub use keys::{StorageKey, decode_storage_key, encode_storage_key};
pub use records::RecordStore;
pub use tables::Tables;
