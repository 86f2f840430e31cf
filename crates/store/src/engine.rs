//! redb storage engine wrapper.
//!
//! Provides a thin wrapper around a redb database with:
//! - Database lifecycle management (directory creation, table setup)
//! - File-backed and in-memory constructors
//! - Transaction entry points mapped onto [`StoreError`]

use std::path::Path;
use std::sync::Arc;

use redb::backends::InMemoryBackend;
use redb::{Builder, Database, ReadTransaction, WriteTransaction};
use snafu::ResultExt;
use tracing::debug;

use crate::error::{
    CommitSnafu, CreateDirectorySnafu, OpenSnafu, Result, TableSnafu, TransactionSnafu,
};
use crate::tables::Tables;

/// Storage engine backed by redb.
///
/// Cloning is cheap: clones share the same database handle.
#[derive(Clone)]
pub struct StorageEngine {
    db: Arc<Database>,
}

#[allow(clippy::result_large_err)]
impl StorageEngine {
    /// Open or create a database file at the given path.
    ///
    /// Missing parent directories are created.
    pub fn open(path: impl AsRef<Path>, cache_size_bytes: usize) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .context(CreateDirectorySnafu { path: parent.display().to_string() })?;
        }

        let db = Builder::new()
            .set_cache_size(cache_size_bytes)
            .create(path)
            .context(OpenSnafu { path: path.display().to_string() })?;
        debug!(path = %path.display(), cache_size_bytes, "Opened database");

        Self::init(db)
    }

    /// Create a new in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let db = Builder::new()
            .create_with_backend(InMemoryBackend::new())
            .context(OpenSnafu { path: ":memory:" })?;
        debug!("Opened in-memory database");

        Self::init(db)
    }

    /// Ensures the records table exists so read transactions can open it.
    fn init(db: Database) -> Result<Self> {
        let txn = db.begin_write().context(TransactionSnafu)?;
        txn.open_table(Tables::RECORDS).context(TableSnafu)?;
        txn.commit().context(CommitSnafu)?;

        Ok(Self { db: Arc::new(db) })
    }

    /// Begin a read-only transaction over a consistent snapshot.
    pub fn begin_read(&self) -> Result<ReadTransaction> {
        self.db.begin_read().context(TransactionSnafu)
    }

    /// Begin a read-write transaction.
    ///
    /// Blocks while another write transaction is open.
    pub fn begin_write(&self) -> Result<WriteTransaction> {
        self.db.begin_write().context(TransactionSnafu)
    }
}
