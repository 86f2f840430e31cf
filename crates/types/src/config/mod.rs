//! Configuration types for kvbase.
//!
//! Configuration can be deserialized from any serde format or built in code.
//! All config structs validate their values at construction time via
//! fallible builders. Post-deserialization validation is available via
//! the `validate()` method on each struct.

// The schemars `JsonSchema` derive expands to code that unwraps internally.
#![allow(clippy::unwrap_used)]

mod store;
mod validation;

use snafu::Snafu;
pub use store::*;
pub use validation::*;

/// Configuration validation error.
///
/// Returned when a configuration value is outside its valid range.
#[derive(Debug, Snafu)]
pub enum ConfigError {
    /// A configuration value is invalid.
    #[snafu(display("invalid config: {message}"))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },
}
