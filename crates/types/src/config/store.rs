//! Store configuration: database location, codec, and engine cache.

use std::path::PathBuf;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ConfigError, ValidationConfig};
use crate::codec::CodecFormat;

/// Minimum cache size: 1 MB.
const MIN_CACHE_SIZE_BYTES: usize = 1024 * 1024;

/// File name of the database inside the configured directory.
pub const DATABASE_FILE_NAME: &str = "kvbase.redb";

/// Store configuration.
///
/// # Validation Rules
///
/// - `path` must not be empty
/// - `cache_size_bytes` must be >= 1 MB (1,048,576 bytes)
/// - `validation` limits must be positive
///
/// # Example
///
/// ```no_run
/// # use kvbase_types::config::StoreConfig;
/// # use kvbase_types::CodecFormat;
/// let config = StoreConfig::builder()
///     .path("/var/lib/kvbase")
///     .codec(CodecFormat::Json)
///     .build()
///     .expect("valid store config");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StoreConfig {
    /// Directory holding the database file. Created on open if missing.
    ///
    /// Default: `data`.
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Encoding used for stored records.
    #[serde(default)]
    pub codec: CodecFormat,
    /// Size of the engine's page cache in bytes.
    ///
    /// Must be >= 1 MB. Default: 64 MB.
    #[serde(default = "default_cache_size")]
    pub cache_size_bytes: usize,
    /// Limits applied to bucket names and record keys.
    #[serde(default)]
    pub validation: ValidationConfig,
}

#[bon::bon]
impl StoreConfig {
    /// Creates a new store configuration with validation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if:
    /// - `path` is empty
    /// - `cache_size_bytes` < 1 MB
    /// - any `validation` limit is zero
    #[builder]
    pub fn new(
        #[builder(default = default_path(), into)] path: PathBuf,
        #[builder(default)] codec: CodecFormat,
        #[builder(default = default_cache_size())] cache_size_bytes: usize,
        #[builder(default)] validation: ValidationConfig,
    ) -> Result<Self, ConfigError> {
        let config = Self { path, codec, cache_size_bytes, validation };
        config.validate()?;
        Ok(config)
    }
}

impl StoreConfig {
    /// Validates the configuration values.
    ///
    /// Call after deserialization to ensure values are within valid ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any value is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation { message: "path must not be empty".to_string() });
        }
        if self.cache_size_bytes < MIN_CACHE_SIZE_BYTES {
            return Err(ConfigError::Validation {
                message: format!(
                    "cache_size_bytes must be >= {} (1 MB), got {}",
                    MIN_CACHE_SIZE_BYTES, self.cache_size_bytes
                ),
            });
        }
        self.validation.validate()
    }

    /// Full path of the database file inside [`path`](Self::path).
    pub fn database_file(&self) -> PathBuf {
        self.path.join(DATABASE_FILE_NAME)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            codec: CodecFormat::default(),
            cache_size_bytes: default_cache_size(),
            validation: ValidationConfig::default(),
        }
    }
}

fn default_path() -> PathBuf {
    PathBuf::from("data")
}

fn default_cache_size() -> usize {
    64 * 1024 * 1024 // 64 MB
}
