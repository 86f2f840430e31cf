//! Error types for store operations.

use kvbase_types::{CodecError, ConfigError, ErrorCode, ValidationError};
use snafu::Snafu;

/// Store error types.
///
/// Existence failures ([`AlreadyExists`](Self::AlreadyExists),
/// [`NotFound`](Self::NotFound)) are always distinguishable from codec and
/// engine failures. Engine errors keep the underlying `redb` error as source.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum StoreError {
    /// A record already exists under this bucket and key.
    #[snafu(display("Key already exists: {bucket}/{key}"))]
    AlreadyExists {
        /// Bucket name.
        bucket: String,
        /// Record key.
        key: String,
    },

    /// No record exists under this bucket and key.
    #[snafu(display("Key not found: {bucket}/{key}"))]
    NotFound {
        /// Bucket name.
        bucket: String,
        /// Record key.
        key: String,
    },

    /// Record encoding or decoding failed.
    #[snafu(display("Codec error: {source}"))]
    Codec {
        /// The underlying codec error.
        source: CodecError,
    },

    /// Bucket name or record key rejected by validation.
    #[snafu(display("Invalid argument: {source}"))]
    InvalidName {
        /// The violated rule.
        source: ValidationError,
    },

    /// Store configuration rejected.
    #[snafu(display("Config error: {source}"))]
    Config {
        /// The underlying config error.
        source: ConfigError,
    },

    /// The database directory could not be created.
    #[snafu(display("Failed to create directory {path}: {source}"))]
    CreateDirectory {
        /// Directory path.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The database file could not be opened or created.
    #[snafu(display("Failed to open database at {path}: {source}"))]
    Open {
        /// Database path.
        path: String,
        /// The underlying redb error.
        source: redb::DatabaseError,
    },

    /// Beginning a transaction failed.
    #[snafu(display("Transaction error: {source}"))]
    Transaction {
        /// The underlying redb error.
        source: redb::TransactionError,
    },

    /// Opening the records table failed.
    #[snafu(display("Table error: {source}"))]
    Table {
        /// The underlying redb error.
        source: redb::TableError,
    },

    /// A point lookup, write, removal, or iteration step failed.
    #[snafu(display("Storage error: {source}"))]
    Storage {
        /// The underlying redb error.
        source: redb::StorageError,
    },

    /// Committing a write transaction failed.
    #[snafu(display("Commit error: {source}"))]
    Commit {
        /// The underlying redb error.
        source: redb::CommitError,
    },

    /// A stored physical key inside a bucket prefix is not valid UTF-8.
    #[snafu(display("Invalid storage key: {key}"))]
    InvalidStorageKey {
        /// Lossy rendering of the physical key.
        key: String,
    },
}

impl StoreError {
    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::AlreadyExists { .. } => ErrorCode::AppRecordAlreadyExists,
            Self::NotFound { .. } => ErrorCode::AppRecordNotFound,
            Self::Codec { .. } => ErrorCode::AppSerialization,
            Self::InvalidName { .. } => ErrorCode::AppInvalidArgument,
            Self::Config { .. } => ErrorCode::AppConfig,
            Self::CreateDirectory { .. } => ErrorCode::AppIo,
            Self::Open { .. } => ErrorCode::StorageDatabaseOpen,
            Self::Transaction { .. } | Self::Commit { .. } => ErrorCode::StorageTransaction,
            Self::Table { .. } | Self::Storage { .. } => ErrorCode::StorageTableOperation,
            Self::InvalidStorageKey { .. } => ErrorCode::StorageKeyEncoding,
        }
    }

    /// Returns `true` for [`StoreError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` for [`StoreError::AlreadyExists`].
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// Result type for store operations.
pub type Result<T, E = StoreError> = std::result::Result<T, E>;
