//! Input validation for bucket names and record keys.
//!
//! Physical keys are composed as `{bucket}_{key}`. Keeping `_` out of bucket
//! names makes that composition injective: the first `_` in a physical key
//! always ends the bucket name, so keys themselves may contain `_` freely.

use std::fmt;

use crate::config::ValidationConfig;

/// Byte separating the bucket name from the record key in a physical key.
pub const KEY_DELIMITER: u8 = b'_';

/// Validation error with structured context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that failed validation.
    pub field: String,
    /// Description of the violated constraint.
    pub constraint: String,
}

impl ValidationError {
    fn new(field: &str, constraint: impl Into<String>) -> Self {
        Self { field: field.to_string(), constraint: constraint.into() }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.constraint)
    }
}

impl std::error::Error for ValidationError {}

/// Validates a bucket name.
///
/// Bucket names must:
/// - Be non-empty
/// - Not exceed `config.max_bucket_bytes` in UTF-8 byte length
/// - Not contain the key delimiter `_`
///
/// # Errors
///
/// Returns [`ValidationError`] naming the violated rule.
pub fn validate_bucket(bucket: &str, config: &ValidationConfig) -> Result<(), ValidationError> {
    if bucket.is_empty() {
        return Err(ValidationError::new("bucket", "must not be empty"));
    }
    if bucket.len() > config.max_bucket_bytes {
        return Err(ValidationError::new(
            "bucket",
            format!(
                "length {} bytes exceeds maximum {} bytes",
                bucket.len(),
                config.max_bucket_bytes
            ),
        ));
    }
    if let Some(pos) = bucket.bytes().position(|b| b == KEY_DELIMITER) {
        return Err(ValidationError::new(
            "bucket",
            format!("contains key delimiter '_' at byte offset {pos}"),
        ));
    }
    Ok(())
}

/// Validates a record key.
///
/// Record keys must be non-empty and must not exceed `config.max_key_bytes`.
///
/// # Errors
///
/// Returns [`ValidationError`] naming the violated rule.
pub fn validate_key(key: &str, config: &ValidationConfig) -> Result<(), ValidationError> {
    if key.is_empty() {
        return Err(ValidationError::new("key", "must not be empty"));
    }
    if key.len() > config.max_key_bytes {
        return Err(ValidationError::new(
            "key",
            format!("length {} bytes exceeds maximum {} bytes", key.len(), config.max_key_bytes),
        ));
    }
    Ok(())
}
