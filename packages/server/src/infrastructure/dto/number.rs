//! JSON number handling shared by the wire and state-file DTOs.
//!
//! JSON does not distinguish `1` from `1.0`; both are accepted wherever an
//! integer is expected. Fractional values are never truncated.

use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

/// Integer value of `value` when it is a JSON number without a fractional part
pub fn whole_i64(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64)
    })
}

/// Like [`whole_i64`], but negative numbers are rejected
pub fn whole_u64(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// `deserialize_with` for an optional whole number; `null` counts as missing
pub fn deserialize_optional_whole_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(value) => whole_i64(&value)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("expected a whole number, got {}", value))),
    }
}
