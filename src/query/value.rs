//! Helpers producing property values in their REST wire encoding
//!
//! Only what filters commonly need. Anything else can be written as raw JSON.

use crate::entity::Key;
use crate::types::JsonValue;
use serde_json::json;

/// Null value
pub fn null() -> JsonValue {
    json!({ "nullValue": null })
}

/// Boolean value
pub fn boolean(value: bool) -> JsonValue {
    json!({ "booleanValue": value })
}

/// Integer value (int64 travels as a decimal string)
pub fn integer(value: i64) -> JsonValue {
    json!({ "integerValue": value.to_string() })
}

/// Double value
pub fn double(value: f64) -> JsonValue {
    json!({ "doubleValue": value })
}

/// String value
pub fn string(value: impl Into<String>) -> JsonValue {
    json!({ "stringValue": value.into() })
}

/// Key value
pub fn key(value: &Key) -> JsonValue {
    json!({ "keyValue": value })
}
