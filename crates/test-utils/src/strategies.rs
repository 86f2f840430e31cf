//! Proptest strategies for kvbase domain values.
//!
//! Reusable generators for property-based testing across crates. Strategies
//! produce valid bucket names, keys, and records while exploring edge cases
//! such as delimiter-bearing keys and buckets that share a textual prefix.
//!
//! # Usage
//!
//! ```no_run
//! use kvbase_test_utils::strategies;
//! use proptest::prelude::*;
//!
//! proptest! {
//!     #[test]
//!     fn my_property(ops in strategies::arb_op_sequence(1..20)) {
//!         // apply ops to a store and a model, compare
//!     }
//! }
//! ```

use std::ops::Range;

use proptest::prelude::*;
use serde::{Deserialize, Serialize};

/// A small record shape used by store property tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Display name.
    pub name: String,
    /// Arbitrary numeric payload.
    pub score: u32,
    /// Optional labels.
    pub tags: Vec<String>,
}

/// A single record lifecycle operation, as generated for model-based tests.
#[derive(Debug, Clone)]
pub enum RecordOp {
    /// Create a record.
    Create {
        /// Bucket name.
        bucket: String,
        /// Record key.
        key: String,
        /// Record to store.
        record: TestRecord,
    },
    /// Update a record.
    Update {
        /// Bucket name.
        bucket: String,
        /// Record key.
        key: String,
        /// Replacement record.
        record: TestRecord,
    },
    /// Delete a record.
    Delete {
        /// Bucket name.
        bucket: String,
        /// Record key.
        key: String,
    },
}

/// Generates a valid bucket name of 1-12 characters matching `[a-z][a-z0-9-]{0,11}`.
pub fn arb_bucket() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9-]{0,11}"
}

/// Generates a bucket from a small fixed pool, including names that prefix each other.
///
/// Keeps operation sequences dense enough to hit existing keys.
pub fn arb_pooled_bucket() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "a".to_string(),
        "ab".to_string(),
        "users".to_string(),
        "users-archive".to_string(),
    ])
}

/// Generates a record key of 1-16 characters that may contain `_`.
pub fn arb_key() -> impl Strategy<Value = String> {
    "[a-z0-9_]{1,16}"
}

/// Generates a key from a small pool so sequences revisit the same records.
pub fn arb_pooled_key() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "1".to_string(),
        "2".to_string(),
        "a_b".to_string(),
        "a".to_string(),
        "_".to_string(),
    ])
}

/// Generates an arbitrary [`TestRecord`].
pub fn arb_record() -> impl Strategy<Value = TestRecord> {
    ("[A-Za-z ]{0,16}", any::<u32>(), proptest::collection::vec("[a-z]{1,8}", 0..4))
        .prop_map(|(name, score, tags)| TestRecord { name, score, tags })
}

/// Generates an arbitrary [`RecordOp`] over pooled buckets and keys.
pub fn arb_op() -> impl Strategy<Value = RecordOp> {
    prop_oneof![
        3 => (arb_pooled_bucket(), arb_pooled_key(), arb_record())
            .prop_map(|(bucket, key, record)| RecordOp::Create { bucket, key, record }),
        2 => (arb_pooled_bucket(), arb_pooled_key(), arb_record())
            .prop_map(|(bucket, key, record)| RecordOp::Update { bucket, key, record }),
        2 => (arb_pooled_bucket(), arb_pooled_key())
            .prop_map(|(bucket, key)| RecordOp::Delete { bucket, key }),
    ]
}

/// Generates a sequence of [`RecordOp`]s with a length in `len`.
pub fn arb_op_sequence(len: Range<usize>) -> impl Strategy<Value = Vec<RecordOp>> {
    proptest::collection::vec(arb_op(), len)
}
