//! Temporary directory management for tests.
//!
//! [`TestDir`] wraps [`tempfile::TempDir`] and knows how to turn itself into
//! a [`StoreConfig`] pointing at a fresh store location.

// Test utilities are expected to panic on failure - that's their purpose
#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use kvbase_types::{CodecFormat, StoreConfig};
use tempfile::TempDir;

/// Directory name used for store data inside a [`TestDir`].
const STORE_DIR: &str = "data";

/// A managed temporary directory for tests.
///
/// The directory is automatically cleaned up when this struct is dropped.
///
/// # Example
///
/// ```
/// use kvbase_test_utils::TestDir;
///
/// let dir = TestDir::new();
/// let config = dir.store_config();
/// assert!(config.path.starts_with(dir.path()));
/// // Directory cleaned up when `dir` goes out of scope
/// ```
pub struct TestDir {
    inner: TempDir,
}

impl TestDir {
    /// Create a new temporary directory.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let inner = TempDir::new().expect("failed to create temp directory");
        Self { inner }
    }

    /// Returns the path to the temporary directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Join a relative path to the temporary directory.
    #[must_use]
    pub fn join<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.inner.path().join(path)
    }

    /// Store configuration rooted inside this directory, JSON codec.
    ///
    /// # Panics
    ///
    /// Panics if the resulting configuration fails validation.
    #[must_use]
    pub fn store_config(&self) -> StoreConfig {
        self.store_config_with(CodecFormat::Json)
    }

    /// Store configuration rooted inside this directory with the given codec.
    ///
    /// # Panics
    ///
    /// Panics if the resulting configuration fails validation.
    #[must_use]
    pub fn store_config_with(&self, codec: CodecFormat) -> StoreConfig {
        StoreConfig::builder()
            .path(self.join(STORE_DIR))
            .codec(codec)
            .cache_size_bytes(1024 * 1024)
            .build()
            .expect("test store config should be valid")
    }
}

impl Default for TestDir {
    fn default() -> Self {
        Self::new()
    }
}
