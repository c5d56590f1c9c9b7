//! Common types used throughout Solidafy Datastore
//!
//! This module contains shared type definitions, type aliases,
//! and the opaque wire tokens (cursors, continuation flags) that the
//! pagination engine passes around.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

// ============================================================================
// Cursor
// ============================================================================

/// Opaque position token issued by the query service.
///
/// A cursor is an uninterpreted byte string. It is stored and forwarded
/// verbatim; equality is exact byte equality. On the REST wire cursors travel
/// as standard base64 strings, which is what `Serialize`/`Deserialize` and
/// `Display` produce.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct Cursor(Bytes);

impl Cursor {
    /// Create a cursor from raw bytes
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self(bytes.into())
    }

    /// Create a cursor from a static byte string
    pub const fn from_static(bytes: &'static [u8]) -> Self {
        Self(Bytes::from_static(bytes))
    }

    /// Decode a cursor from its base64 wire form
    pub fn from_base64(encoded: &str) -> crate::Result<Self> {
        STANDARD
            .decode(encoded.trim())
            .map(|raw| Self(Bytes::from(raw)))
            .map_err(|e| crate::Error::decode(format!("Invalid cursor '{encoded}': {e}")))
    }

    /// Encode the cursor to its base64 wire form
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.0)
    }

    /// Raw cursor bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Check if the cursor carries no bytes
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&'static str> for Cursor {
    fn from(value: &'static str) -> Self {
        Self::from_static(value.as_bytes())
    }
}

impl From<Vec<u8>> for Cursor {
    fn from(value: Vec<u8>) -> Self {
        Self(Bytes::from(value))
    }
}

impl From<String> for Cursor {
    fn from(value: String) -> Self {
        Self(Bytes::from(value))
    }
}

impl From<Bytes> for Cursor {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.to_base64()).finish()
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base64())
    }
}

impl Serialize for Cursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base64())
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(|raw| Self(Bytes::from(raw)))
            .map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// More Results
// ============================================================================

/// Continuation indicator reported with every result batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MoreResults {
    /// Service did not say
    #[default]
    MoreResultsTypeUnspecified,
    /// There may be more batches after this one
    NotFinished,
    /// The query limit was reached
    MoreResultsAfterLimit,
    /// The query end cursor was reached
    MoreResultsAfterCursor,
    /// The result set is exhausted
    NoMoreResults,
}

impl MoreResults {
    /// Check if the service asked for another page
    pub fn is_not_finished(&self) -> bool {
        matches!(self, Self::NotFinished)
    }

    /// Check if no further page should be requested
    pub fn is_done(&self) -> bool {
        !self.is_not_finished()
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

// ============================================================================
// Utilities
// ============================================================================

/// Extension trait for Option<String> to handle empty strings
pub trait OptionStringExt {
    /// Returns None if the string is empty
    fn none_if_empty(self) -> Option<String>;
}

impl OptionStringExt for Option<String> {
    fn none_if_empty(self) -> Option<String> {
        self.filter(|s| !s.is_empty())
    }
}
