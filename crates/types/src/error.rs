//! Machine-readable error codes for kvbase.
//!
//! Every store error variant maps to an [`ErrorCode`] with a unique numeric
//! identifier and a retryability classification. The store itself never
//! retries; the classification exists for callers that own a retry policy.
//!
//! | Range       | Domain      | Examples                                  |
//! |-------------|-------------|-------------------------------------------|
//! | 1000–1099   | Storage     | Database open, transaction, table ops     |
//! | 3100–3199   | Application | Record not found, record already exists   |
//! | 3200–3299   | Application | Serialization, config, I/O, arguments     |

use core::fmt;

/// Machine-readable error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // --- Storage errors (1000–1099) ---
    /// Database file could not be opened or created.
    StorageDatabaseOpen = 1000,
    /// Transaction begin or commit failed.
    StorageTransaction = 1001,
    /// Table open, lookup, insert, remove, or iteration failed.
    StorageTableOperation = 1002,
    /// A physical key could not be split back into bucket and key.
    StorageKeyEncoding = 1003,

    // --- Application errors (3100–3299) ---
    /// No record is stored under the bucket and key.
    AppRecordNotFound = 3100,
    /// A record is already stored under the bucket and key.
    AppRecordAlreadyExists = 3101,
    /// Record encoding or decoding failed.
    AppSerialization = 3200,
    /// Configuration error.
    AppConfig = 3201,
    /// Filesystem I/O error.
    AppIo = 3202,
    /// Invalid bucket name or record key.
    AppInvalidArgument = 3203,
}

impl ErrorCode {
    /// Returns the numeric code value.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    /// Converts a numeric code to an `ErrorCode`, returning `None` for unknown values.
    #[must_use]
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            1000 => Some(Self::StorageDatabaseOpen),
            1001 => Some(Self::StorageTransaction),
            1002 => Some(Self::StorageTableOperation),
            1003 => Some(Self::StorageKeyEncoding),
            3100 => Some(Self::AppRecordNotFound),
            3101 => Some(Self::AppRecordAlreadyExists),
            3200 => Some(Self::AppSerialization),
            3201 => Some(Self::AppConfig),
            3202 => Some(Self::AppIo),
            3203 => Some(Self::AppInvalidArgument),
            _ => None,
        }
    }

    /// Whether a caller may reasonably retry an operation that failed with this code.
    ///
    /// Only transient engine conditions qualify. Existence and validation
    /// failures are deterministic and will fail again.
    #[must_use]
    pub const fn is_retryable(self) -> bool {
        matches!(self, Self::StorageTransaction | Self::AppIo)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}
