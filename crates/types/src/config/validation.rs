//! Limits for bucket names and record keys.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ConfigError;

fn default_max_bucket_bytes() -> usize {
    255
}

fn default_max_key_bytes() -> usize {
    1024
}

/// Size limits enforced on every bucket name and record key.
///
/// # Example
///
/// ```no_run
/// # use kvbase_types::config::ValidationConfig;
/// let config = ValidationConfig::builder()
///     .max_key_bytes(512)
///     .build()
///     .expect("valid validation config");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationConfig {
    /// Maximum bucket name size in bytes.
    ///
    /// Must be >= 1. Default: 255.
    #[serde(default = "default_max_bucket_bytes")]
    pub max_bucket_bytes: usize,
    /// Maximum record key size in bytes.
    ///
    /// Must be >= 1. Default: 1024 (1 KB).
    #[serde(default = "default_max_key_bytes")]
    pub max_key_bytes: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_bucket_bytes: default_max_bucket_bytes(),
            max_key_bytes: default_max_key_bytes(),
        }
    }
}

#[bon::bon]
impl ValidationConfig {
    /// Creates a new validation configuration, verifying all limits are positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any limit is zero.
    #[builder]
    pub fn new(
        #[builder(default = default_max_bucket_bytes())] max_bucket_bytes: usize,
        #[builder(default = default_max_key_bytes())] max_key_bytes: usize,
    ) -> Result<Self, ConfigError> {
        let config = Self { max_bucket_bytes, max_key_bytes };
        config.validate()?;
        Ok(config)
    }
}

impl ValidationConfig {
    /// Validates that all limits are positive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any limit is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_bucket_bytes == 0 {
            return Err(ConfigError::Validation {
                message: "max_bucket_bytes must be >= 1".to_string(),
            });
        }
        if self.max_key_bytes == 0 {
            return Err(ConfigError::Validation {
                message: "max_key_bytes must be >= 1".to_string(),
            });
        }
        Ok(())
    }
}
