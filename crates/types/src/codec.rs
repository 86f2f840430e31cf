//! Record serialization.
//!
//! Stored values are the codec bytes of a caller-defined record. The store is
//! generic over [`Codec`] so the encoding can be swapped without touching key
//! layout or lifecycle logic. [`JsonCodec`] is the default and produces a
//! self-describing encoding; [`PostcardCodec`] trades that for compactness.
//! [`CodecFormat`] selects one of the two at runtime from configuration.

use core::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use snafu::Snafu;

/// Error type for codec operations.
#[derive(Debug, Snafu)]
pub enum CodecError {
    /// JSON encoding failed.
    #[snafu(display("Encoding failed (json): {source}"))]
    JsonEncode {
        /// The underlying serde_json error.
        source: serde_json::Error,
    },

    /// JSON decoding failed.
    #[snafu(display("Decoding failed (json): {source}"))]
    JsonDecode {
        /// The underlying serde_json error.
        source: serde_json::Error,
    },

    /// Postcard encoding failed.
    #[snafu(display("Encoding failed (postcard): {source}"))]
    PostcardEncode {
        /// The underlying postcard error.
        source: postcard::Error,
    },

    /// Postcard decoding failed.
    #[snafu(display("Decoding failed (postcard): {source}"))]
    PostcardDecode {
        /// The underlying postcard error.
        source: postcard::Error,
    },
}

impl CodecError {
    /// Returns `true` if this error was raised while decoding stored bytes.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::JsonDecode { .. } | Self::PostcardDecode { .. })
    }
}

/// Converts records to and from their stored byte representation.
///
/// Implementations must round-trip any `Serialize + DeserializeOwned` shape.
pub trait Codec: Send + Sync {
    /// Encodes a record to bytes.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] encode variant if serialization fails.
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError>;

    /// Decodes a record from bytes into a freshly constructed value.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] decode variant if the bytes do not describe a `T`.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError>;
}

/// JSON codec backed by `serde_json`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonCodec;

impl Codec for JsonCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        serde_json::to_vec(value).map_err(|source| CodecError::JsonEncode { source })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        serde_json::from_slice(bytes).map_err(|source| CodecError::JsonDecode { source })
    }
}

/// Compact binary codec backed by `postcard`.
///
/// Not self-describing: bytes only decode into the shape they were written from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostcardCodec;

impl Codec for PostcardCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        postcard::to_allocvec(value).map_err(|source| CodecError::PostcardEncode { source })
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        postcard::from_bytes(bytes).map_err(|source| CodecError::PostcardDecode { source })
    }
}

/// Runtime-selectable codec, as named in [`StoreConfig`](crate::StoreConfig).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum CodecFormat {
    /// [`JsonCodec`].
    #[default]
    Json,
    /// [`PostcardCodec`].
    Postcard,
}

impl CodecFormat {
    /// Returns the configuration name of this format.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Postcard => "postcard",
        }
    }
}

impl fmt::Display for CodecFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Codec for CodecFormat {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, CodecError> {
        match self {
            Self::Json => JsonCodec.encode(value),
            Self::Postcard => PostcardCodec.encode(value),
        }
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, CodecError> {
        match self {
            Self::Json => JsonCodec.decode(bytes),
            Self::Postcard => PostcardCodec.decode(bytes),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Profile {
        id: u64,
        name: String,
        tags: Vec<String>,
        nested: Option<Address>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Address {
        city: String,
        zip: u32,
    }

    fn sample() -> Profile {
        Profile {
            id: 7,
            name: "Ann".to_string(),
            tags: vec!["admin".to_string(), "ops".to_string()],
            nested: Some(Address { city: "Lisbon".to_string(), zip: 1100 }),
        }
    }

    #[test]
    fn test_json_roundtrip_struct() {
        let bytes = JsonCodec.encode(&sample()).expect("encode");
        let decoded: Profile = JsonCodec.decode(&bytes).expect("decode");
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_postcard_roundtrip_struct() {
        let bytes = PostcardCodec.encode(&sample()).expect("encode");
        let decoded: Profile = PostcardCodec.decode(&bytes).expect("decode");
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_json_is_self_describing() {
        let bytes = JsonCodec.encode(&sample()).expect("encode");
        let generic: serde_json::Value = JsonCodec.decode(&bytes).expect("decode as value");
        assert_eq!(generic["name"], "Ann");
        assert_eq!(generic["nested"]["zip"], 1100);
    }

    #[test]
    fn test_json_bytes_match_serde_json() {
        let mut map = BTreeMap::new();
        map.insert("name", "Ann");
        let bytes = JsonCodec.encode(&map).expect("encode");
        assert_eq!(bytes, br#"{"name":"Ann"}"#);
    }

    #[test]
    fn test_format_dispatches_to_codec() {
        let json = CodecFormat::Json.encode(&sample()).expect("encode json");
        assert_eq!(json, JsonCodec.encode(&sample()).expect("encode"));

        let compact = CodecFormat::Postcard.encode(&sample()).expect("encode postcard");
        assert_eq!(compact, PostcardCodec.encode(&sample()).expect("encode"));
        assert!(compact.len() < json.len());
    }

    #[test]
    fn test_decode_malformed_json() {
        let err = JsonCodec.decode::<Profile>(b"{not json").unwrap_err();
        assert!(matches!(err, CodecError::JsonDecode { .. }));
        assert!(err.is_decode());
        assert!(err.to_string().starts_with("Decoding failed (json):"));
    }

    #[test]
    fn test_decode_truncated_postcard() {
        let bytes = PostcardCodec.encode(&sample()).expect("encode");
        let err = PostcardCodec.decode::<Profile>(&bytes[..2]).unwrap_err();
        assert!(matches!(err, CodecError::PostcardDecode { .. }));
    }

    #[test]
    fn test_decode_empty_input() {
        assert!(JsonCodec.decode::<u64>(&[]).unwrap_err().is_decode());
        assert!(PostcardCodec.decode::<u64>(&[]).unwrap_err().is_decode());
    }

    #[test]
    fn test_decode_wrong_shape() {
        let bytes = JsonCodec.encode(&"just a string").expect("encode");
        assert!(JsonCodec.decode::<Profile>(&bytes).is_err());
    }

    #[test]
    fn test_codec_error_source_chain() {
        use std::error::Error;

        let err = JsonCodec.decode::<u64>(b"[").unwrap_err();
        let source = err.source().expect("codec error should carry a source");
        assert!(!source.to_string().is_empty());
    }

    #[test]
    fn test_format_serde_names() {
        assert_eq!(serde_json::to_string(&CodecFormat::Json).unwrap(), r#""json""#);
        assert_eq!(
            serde_json::from_str::<CodecFormat>(r#""postcard""#).unwrap(),
            CodecFormat::Postcard
        );
        assert_eq!(CodecFormat::default(), CodecFormat::Json);
        assert_eq!(CodecFormat::Postcard.to_string(), "postcard");
    }
}
