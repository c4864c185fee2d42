//! Lenient field deserializers for FMP payloads.
//!
//! FMP omits fields, sends `null`, and occasionally encodes integers as floats
//! (`3.9103e11`) or numbers as strings. Every field of a statement falls back
//! to its zero value instead of failing the whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// String field; numbers are rendered, `null` becomes empty.
pub(crate) fn de_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Deserialize::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(num) => Ok(num.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(serde::de::Error::custom("expected a string")),
    }
}

/// Integer field; floats are truncated toward zero.
pub(crate) fn de_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Deserialize::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(0),
        Value::Number(num) => num
            .as_i64()
            .or_else(|| num.as_f64().filter(|f| f.is_finite()).map(|f| f as i64))
            .ok_or_else(|| serde::de::Error::custom(format!("integer out of range: {num}"))),
        Value::String(s) if s.trim().is_empty() => Ok(0),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .or_else(|_| s.trim().parse::<f64>().map(|f| f as i64))
            .map_err(|_| serde::de::Error::custom(format!("not an integer: {s:?}"))),
        _ => Err(serde::de::Error::custom("expected an integer")),
    }
}

/// Float field.
pub(crate) fn de_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Value = Deserialize::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(0.0),
        Value::Number(num) => num
            .as_f64()
            .ok_or_else(|| serde::de::Error::custom(format!("not a float: {num}"))),
        Value::String(s) if s.trim().is_empty() => Ok(0.0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("not a float: {s:?}"))),
        _ => Err(serde::de::Error::custom("expected a float")),
    }
}
