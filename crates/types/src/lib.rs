//! Core types for kvbase.
//!
//! This crate provides the pieces shared by the store and its callers:
//! - The record [`Codec`] trait with JSON and postcard implementations
//! - Machine-readable [`ErrorCode`]s
//! - Store configuration with validated builders
//! - Bucket name and record key validation

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod error;
pub mod validation;

pub use codec::{Codec, CodecError, CodecFormat, JsonCodec, PostcardCodec};
pub use config::{ConfigError, StoreConfig, ValidationConfig};
pub use error::ErrorCode;
pub use validation::{KEY_DELIMITER, ValidationError, validate_bucket, validate_key};
