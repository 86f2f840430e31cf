//! Table definitions for redb storage.
//!
//! Every record lives in a single byte-keyed table. Buckets are not tables:
//! they exist only as physical key prefixes (see [`crate::keys`]).

use redb::TableDefinition;

/// Table definitions for kvbase storage.
pub struct Tables;

impl Tables {
    /// Record storage: physical key → codec bytes
    /// Key format: {bucket:var}_{key:var}
    pub const RECORDS: TableDefinition<'static, &'static [u8], &'static [u8]> =
        TableDefinition::new("records");
}
