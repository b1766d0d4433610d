//! Pure functions for serializing/deserializing cached values to/from bytes.
//!
//! Cached lists are stored as JSON, which keeps cache values human-readable
//! and easy to inspect with `redis-cli`.

use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes a value to JSON bytes.
pub fn serialize_value<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a value.
pub fn deserialize_value<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use chrono::{TimeZone, Utc};

    fn category(id: i64, title: &str) -> Category {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap();
        Category {
            id,
            title: title.to_string(),
            slug: title.to_lowercase(),
            image: None,
            created_at: ts,
            updated_at: ts,
        }
    }

    #[test]
    fn test_roundtrip_preserves_order() {
        let categories = vec![category(2, "Phones"), category(1, "Laptops")];

        let bytes = serialize_value(&categories).expect("serialize should succeed");
        let deserialized: Vec<Category> =
            deserialize_value(&bytes).expect("deserialize should succeed");

        assert_eq!(categories, deserialized);
    }

    #[test]
    fn test_empty_list_is_a_valid_value() {
        let bytes = serialize_value::<[Category]>(&[]).unwrap();
        assert_eq!(bytes, b"[]");
        let deserialized: Vec<Category> = deserialize_value(&bytes).unwrap();
        assert!(deserialized.is_empty());
    }

    #[test]
    fn test_deserialize_malformed_bytes() {
        let result: Result<Vec<Category>> = deserialize_value(b"{\"invalid\": true}");

        assert!(matches!(
            result.unwrap_err(),
            SerializationError::DeserializeFailed(_)
        ));
    }
}
