//! Shared test utilities for kvbase crates.
//!
//! - [`TestDir`] - Managed temporary directory that yields store configs
//! - [`strategies`] - Proptest generators for buckets, keys, records, and ops

#![deny(unsafe_code)]

mod test_dir;
pub use test_dir::TestDir;

pub mod strategies;
pub use strategies::{RecordOp, TestRecord};
